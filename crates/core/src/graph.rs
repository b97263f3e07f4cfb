use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;

/// One placed node. Positions are world-space; rotation is Euler radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub position: [f32; 3],
    pub rotation: Option<[f32; 3]>,
    pub scale: Option<f32>,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGroup {
    pub index: u32,
    pub nodes: Vec<Node>,
}

/// A point on a branch's resampled curve. `progress` runs 0 at the branch
/// start to 1 at its end, strictly increasing along the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub position: [f32; 3],
    pub progress: f32,
}

/// A grown branch: the shaped control points plus the dense resampling.
/// Always has at least 2 control points; anything shorter is dropped before
/// it reaches a `Graph`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub control_points: Vec<[f32; 3]>,
    pub samples: Vec<Sample>,
}

impl Branch {
    /// Rebuild the smooth curve over the control points for point/tangent
    /// queries at arbitrary parameter t.
    pub fn curve(&self) -> Curve {
        Curve::new(self.control_points.iter().map(|p| Vec3::from(*p)).collect())
    }
}

/// Identifies a node by its group and its index within that group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub group: u32,
    pub node: u32,
}

/// An unordered proximity edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub a: NodeRef,
    pub b: NodeRef,
    pub a_position: [f32; 3],
    pub b_position: [f32; 3],
}

impl Connection {
    pub fn length(&self) -> f32 {
        Vec3::from(self.a_position).distance(Vec3::from(self.b_position))
    }
}

/// One complete generation result. Rebuilt from scratch on every run; no
/// partial-update path exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub groups: Vec<NodeGroup>,
    pub branches: Vec<Branch>,
    pub connections: Vec<Connection>,
}

impl Graph {
    pub fn node(&self, node_ref: NodeRef) -> Option<&Node> {
        self.groups
            .iter()
            .find(|group| group.index == node_ref.group)?
            .nodes
            .get(node_ref.node as usize)
    }

    pub fn node_count(&self) -> usize {
        self.groups.iter().map(|group| group.nodes.len()).sum()
    }
}
