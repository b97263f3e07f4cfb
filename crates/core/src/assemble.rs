use glam::Vec3;

use crate::branch::{clip_to_radius, grow_branch, normalize_to_radius, perpendicular_axis};
use crate::config::{ArborParams, ClusterParams, ConfigError, GraphParams, LatticeParams};
use crate::connect::{all_pairs_within, closest_pairs_between};
use crate::curve::Curve;
use crate::graph::{Branch, Graph, NodeGroup};
use crate::placement::{place_clustered, place_rejection, ClusteredSpec, RejectionSpec};
use crate::rng::RandomStream;

// Lane bands keep every consumer of the hash on its own stream.
const LANE_BAND: f64 = 1_000_000.0;
const BAND_CENTERS: u32 = 0;
const BAND_GROUP_NODES: u32 = 1;
const BAND_GROUP_BRANCHES: u32 = 2;
const BAND_MAIN_BRANCHES: u32 = 3;
const BAND_SUB_BRANCHES: u32 = 4;
const BAND_LATTICE: u32 = 5;

// Sub-branches spawn away from the parent's endpoints.
const SUB_SPAWN_MIN: f32 = 0.2;
const SUB_SPAWN_SPAN: f32 = 0.6;

fn lane(band: u32, item: u32) -> f64 {
    band as f64 * LANE_BAND + item as f64
}

/// Generate a complete graph for `params` and `seed`. Pure and synchronous:
/// the same inputs always produce the same graph, and each run owns its
/// freshly built result.
pub fn generate(params: &GraphParams, seed: f64) -> Result<Graph, ConfigError> {
    if !seed.is_finite() {
        return Err(ConfigError::NonFinite { field: "seed" });
    }
    params.validate()?;

    let graph = match params {
        GraphParams::Cluster(params) => generate_cluster(params, seed),
        GraphParams::Lattice(params) => generate_lattice(params, seed),
        GraphParams::Arbor(params) => generate_arbor(params, seed),
    };

    tracing::info!(
        nodes = graph.node_count(),
        branches = graph.branches.len(),
        connections = graph.connections.len(),
        "graph generated"
    );
    Ok(graph)
}

/// Fit a curve through the shaped points and resample it. Branches left with
/// fewer than 2 points are dropped here.
fn make_branch(points: Vec<Vec3>, resolution: u32) -> Option<Branch> {
    if points.len() < 2 {
        return None;
    }
    let control_points: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
    let samples = Curve::new(points).sample(resolution);
    Some(Branch {
        control_points,
        samples,
    })
}

fn generate_cluster(params: &ClusterParams, seed: f64) -> Graph {
    let center_spec = ClusteredSpec {
        count: params.cluster_count,
        spread: params.cluster_spread,
        base_scale: 1.0,
    };
    let mut center_stream = RandomStream::new(seed, lane(BAND_CENTERS, 0));
    let centers = place_clustered(&center_spec, Vec3::ZERO, &mut center_stream);

    let node_spec = ClusteredSpec {
        count: params.nodes_per_cluster,
        spread: params.node_spread,
        base_scale: params.base_scale,
    };

    let mut groups = Vec::with_capacity(centers.len());
    let mut branches = Vec::new();

    for (group_index, center) in centers.iter().enumerate() {
        let group_index = group_index as u32;
        let center = Vec3::from(center.position);

        let mut node_stream = RandomStream::new(seed, lane(BAND_GROUP_NODES, group_index));
        let nodes = place_clustered(&node_spec, center, &mut node_stream);

        let mut branch_stream = RandomStream::new(seed, lane(BAND_GROUP_BRANCHES, group_index));
        for node in &nodes {
            for _ in 0..params.branches_per_node {
                let direction = branch_stream.direction();
                let points = grow_branch(
                    &mut branch_stream,
                    Vec3::from(node.position),
                    direction,
                    params.branch_segments,
                    params.branch_step,
                    params.branch_curvature,
                );
                match make_branch(points, params.curve_resolution) {
                    Some(branch) => branches.push(branch),
                    None => tracing::debug!(group = group_index, node = node.index, "dendrite dropped"),
                }
            }
        }

        groups.push(NodeGroup {
            index: group_index,
            nodes,
        });
    }

    let links = closest_pairs_between(&groups, params.max_connection_distance);

    Graph {
        groups,
        branches,
        connections: links.connections,
    }
}

fn generate_lattice(params: &LatticeParams, seed: f64) -> Graph {
    let spec = RejectionSpec {
        count: params.count,
        separation: params.separation,
    };
    let mut stream = RandomStream::new(seed, lane(BAND_LATTICE, 0));
    let nodes = place_rejection(&spec, &mut stream);
    if nodes.len() < params.count as usize {
        tracing::debug!(
            requested = params.count,
            placed = nodes.len(),
            "lattice placement fell short"
        );
    }

    let group = NodeGroup { index: 0, nodes };
    let connections = all_pairs_within(&group, params.max_connection_distance);

    Graph {
        groups: vec![group],
        branches: Vec::new(),
        connections,
    }
}

fn generate_arbor(params: &ArborParams, seed: f64) -> Graph {
    let mut branches = Vec::new();

    for main_index in 0..params.main_branch_count {
        let mut stream = RandomStream::new(seed, lane(BAND_MAIN_BRANCHES, main_index));
        let direction = stream.direction();
        let mut points = grow_branch(
            &mut stream,
            Vec3::ZERO,
            direction,
            params.segments,
            params.step_length,
            params.curvature,
        );
        normalize_to_radius(&mut points, Vec3::ZERO, params.main_radius);

        let Some(primary) = make_branch(points, params.curve_resolution) else {
            tracing::debug!(branch = main_index, "primary branch dropped");
            continue;
        };
        let parent = primary.curve();
        branches.push(primary);

        for sub_index in 0..params.sub_branch_count {
            let item = main_index * params.sub_branch_count + sub_index;
            let mut sub_stream = RandomStream::new(seed, lane(BAND_SUB_BRANCHES, item));

            let t = SUB_SPAWN_MIN + SUB_SPAWN_SPAN * sub_stream.next();
            let start = parent.point(t);
            let tangent = parent.tangent(t);
            let sideways = perpendicular_axis(tangent, sub_stream.direction());
            let direction = tangent
                .lerp(sideways, params.sub_branch_offset)
                .try_normalize()
                .unwrap_or(tangent);

            let mut points = grow_branch(
                &mut sub_stream,
                start,
                direction,
                params.sub_segments,
                params.sub_step_length,
                params.sub_curvature,
            );
            clip_to_radius(&mut points, params.max_radius);

            match make_branch(points, params.curve_resolution) {
                Some(branch) => branches.push(branch),
                None => {
                    tracing::debug!(branch = main_index, sub = sub_index, "sub-branch clipped away")
                }
            }
        }
    }

    Graph {
        groups: Vec::new(),
        branches,
        connections: Vec::new(),
    }
}
