use std::f32::consts::TAU;

use glam::Vec3;

use crate::graph::Node;
use crate::rng::RandomStream;

/// Clustered-in-sphere placement: nodes fill a shell between 0.3 and 1.0 of
/// `spread`, each with a random rotation and a scale jittered around
/// `base_scale`.
#[derive(Debug, Clone, Copy)]
pub struct ClusteredSpec {
    pub count: u32,
    pub spread: f32,
    pub base_scale: f32,
}

/// Jittered-grid placement with rejection sampling for minimum separation.
#[derive(Debug, Clone, Copy)]
pub struct RejectionSpec {
    pub count: u32,
    pub separation: f32,
}

const REJECTION_ATTEMPTS: u32 = 100;
const JITTER_RATIO: f32 = 0.3;
const SEPARATION_RATIO: f32 = 0.8;
const INNER_SHELL: f32 = 0.3;
const OUTER_SHELL: f32 = 0.7;
const SCALE_BASE: f32 = 0.8;
const SCALE_JITTER: f32 = 0.4;

pub fn place_clustered(spec: &ClusteredSpec, center: Vec3, stream: &mut RandomStream) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(spec.count as usize);
    for index in 0..spec.count {
        let theta = stream.next() * TAU;
        // acos(2u - 1) keeps the direction uniform on the sphere
        let phi = (2.0 * stream.next() - 1.0).clamp(-1.0, 1.0).acos();
        let radius = spec.spread * (INNER_SHELL + OUTER_SHELL * stream.next());

        let position = center
            + Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            );
        let rotation = [
            stream.next() * TAU,
            stream.next() * TAU,
            stream.next() * TAU,
        ];
        let scale = spec.base_scale * (SCALE_BASE + SCALE_JITTER * stream.next());

        nodes.push(Node {
            position: position.to_array(),
            rotation: Some(rotation),
            scale: Some(scale),
            index,
        });
    }
    nodes
}

/// Place `count` nodes on a grid of `ceil(cbrt(count))` cells per axis
/// centered on the origin, jittering each candidate and rejecting any closer
/// than `0.8 * separation` to an accepted node. A cell that exhausts its
/// attempts is omitted; the result may be shorter than `count`.
pub fn place_rejection(spec: &RejectionSpec, stream: &mut RandomStream) -> Vec<Node> {
    let per_axis = (spec.count as f32).cbrt().ceil().max(1.0) as u32;
    let half_extent = (per_axis as f32 - 1.0) * 0.5;
    let min_distance = SEPARATION_RATIO * spec.separation;
    let jitter_extent = JITTER_RATIO * spec.separation;

    let mut accepted: Vec<Vec3> = Vec::with_capacity(spec.count as usize);
    let mut nodes = Vec::with_capacity(spec.count as usize);

    'cells: for cell in 0..spec.count {
        let cx = cell % per_axis;
        let cy = (cell / per_axis) % per_axis;
        let cz = cell / (per_axis * per_axis);
        let base = Vec3::new(
            cx as f32 - half_extent,
            cy as f32 - half_extent,
            cz as f32 - half_extent,
        ) * spec.separation;

        for _ in 0..REJECTION_ATTEMPTS {
            let jitter = Vec3::new(
                stream.next_signed(),
                stream.next_signed(),
                stream.next_signed(),
            ) * jitter_extent;
            let candidate = base + jitter;

            if accepted
                .iter()
                .all(|placed| placed.distance(candidate) >= min_distance)
            {
                let index = nodes.len() as u32;
                accepted.push(candidate);
                nodes.push(Node {
                    position: candidate.to_array(),
                    rotation: None,
                    scale: None,
                    index,
                });
                continue 'cells;
            }
        }

        tracing::debug!(cell, attempts = REJECTION_ATTEMPTS, "placement slot exhausted, node omitted");
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clustered_count_and_shell_radius() {
        let spec = ClusteredSpec {
            count: 5,
            spread: 10.0,
            base_scale: 1.0,
        };
        let mut stream = RandomStream::new(0.0, 0.0);
        let nodes = place_clustered(&spec, Vec3::ZERO, &mut stream);

        assert_eq!(nodes.len(), 5);
        for node in &nodes {
            let radius = Vec3::from(node.position).length();
            assert!(
                (3.0 - 1e-4..10.0).contains(&radius),
                "radius {radius} outside shell"
            );
            let scale = node.scale.expect("scale");
            assert!((0.8..1.2).contains(&scale));
            assert!(node.rotation.is_some());
        }
    }

    #[test]
    fn clustered_is_offset_by_center() {
        let spec = ClusteredSpec {
            count: 3,
            spread: 2.0,
            base_scale: 1.0,
        };
        let center = Vec3::new(100.0, 0.0, 0.0);
        let mut stream = RandomStream::new(4.0, 0.0);
        for node in place_clustered(&spec, center, &mut stream) {
            assert!(Vec3::from(node.position).distance(center) <= 2.0);
        }
    }

    #[test]
    fn rejection_honors_minimum_separation() {
        let spec = RejectionSpec {
            count: 27,
            separation: 2.0,
        };
        let mut stream = RandomStream::new(3.0, 0.0);
        let nodes = place_rejection(&spec, &mut stream);

        assert!(!nodes.is_empty());
        assert!(nodes.len() <= 27);
        for (i, a) in nodes.iter().enumerate() {
            for b in nodes.iter().skip(i + 1) {
                let distance = Vec3::from(a.position).distance(Vec3::from(b.position));
                assert!(
                    distance >= 0.8 * spec.separation - 1e-4,
                    "pair too close: {distance}"
                );
            }
        }
    }

    #[test]
    fn rejection_indices_are_dense() {
        let spec = RejectionSpec {
            count: 8,
            separation: 1.0,
        };
        let mut stream = RandomStream::new(9.0, 0.0);
        let nodes = place_rejection(&spec, &mut stream);
        for (position, node) in nodes.iter().enumerate() {
            assert_eq!(node.index, position as u32);
        }
    }

    #[test]
    fn rejection_is_deterministic() {
        let spec = RejectionSpec {
            count: 16,
            separation: 1.5,
        };
        let first = place_rejection(&spec, &mut RandomStream::new(6.0, 0.0));
        let second = place_rejection(&spec, &mut RandomStream::new(6.0, 0.0));
        assert_eq!(first, second);
    }
}
