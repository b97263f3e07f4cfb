use std::collections::BTreeMap;

use glam::Vec3;

use crate::graph::{Connection, Node, NodeGroup, NodeRef};

/// Connections between groups kept closest-pair-only, plus a lookup from
/// endpoint to connection index for marking nodes that carry an active
/// connection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupLinks {
    pub connections: Vec<Connection>,
    pub by_node: BTreeMap<NodeRef, usize>,
}

fn node_distance(a: &Node, b: &Node) -> f32 {
    Vec3::from(a.position).distance(Vec3::from(b.position))
}

/// Connect every unordered pair within one group whose distance is at most
/// `max_distance`. O(n^2) scan.
pub fn all_pairs_within(group: &NodeGroup, max_distance: f32) -> Vec<Connection> {
    let mut connections = Vec::new();
    for (i, a) in group.nodes.iter().enumerate() {
        for b in group.nodes.iter().skip(i + 1) {
            if node_distance(a, b) <= max_distance {
                connections.push(Connection {
                    a: NodeRef {
                        group: group.index,
                        node: a.index,
                    },
                    b: NodeRef {
                        group: group.index,
                        node: b.index,
                    },
                    a_position: a.position,
                    b_position: b.position,
                });
            }
        }
    }
    connections
}

/// For every unordered pair of groups, keep only the single closest node pair
/// and only when it is within `max_distance`. Groups with no pair in range
/// simply stay unconnected.
pub fn closest_pairs_between(groups: &[NodeGroup], max_distance: f32) -> GroupLinks {
    let mut links = GroupLinks::default();

    for (i, first) in groups.iter().enumerate() {
        for second in groups.iter().skip(i + 1) {
            let mut best: Option<(f32, &Node, &Node)> = None;
            for a in &first.nodes {
                for b in &second.nodes {
                    let distance = node_distance(a, b);
                    if distance <= max_distance
                        && best.map_or(true, |(closest, _, _)| distance < closest)
                    {
                        best = Some((distance, a, b));
                    }
                }
            }

            if let Some((_, a, b)) = best {
                let index = links.connections.len();
                let ref_a = NodeRef {
                    group: first.index,
                    node: a.index,
                };
                let ref_b = NodeRef {
                    group: second.index,
                    node: b.index,
                };
                links.connections.push(Connection {
                    a: ref_a,
                    b: ref_b,
                    a_position: a.position,
                    b_position: b.position,
                });
                links.by_node.entry(ref_a).or_insert(index);
                links.by_node.entry(ref_b).or_insert(index);
            }
        }
    }

    links
}
