use glam::{Quat, Vec3};

use crate::rng::RandomStream;

const DEGENERATE_EPSILON: f32 = 1e-6;

/// Grow one branch as a constrained random walk: `segments` steps of
/// `step_length` from `origin`, bending the heading each step by a random
/// angle in [-curvature/2, +curvature/2] about an axis perpendicular to it.
/// Emits `segments + 1` points including the origin.
pub fn grow_branch(
    stream: &mut RandomStream,
    origin: Vec3,
    direction: Vec3,
    segments: u32,
    step_length: f32,
    curvature: f32,
) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(segments as usize + 1);
    points.push(origin);

    let mut position = origin;
    let mut heading = direction.try_normalize().unwrap_or(Vec3::Y);

    for _ in 0..segments {
        let wander = stream.direction();
        let axis = perpendicular_axis(heading, wander);
        let angle = (stream.next() - 0.5) * curvature;
        heading = (Quat::from_axis_angle(axis, angle) * heading).normalize();
        position += heading * step_length;
        points.push(position);
    }

    points
}

/// Unit axis perpendicular to `heading`, preferring `heading x candidate` and
/// falling back to the world X then Y axes when the candidate is parallel to
/// the heading.
pub(crate) fn perpendicular_axis(heading: Vec3, candidate: Vec3) -> Vec3 {
    for basis in [candidate, Vec3::X, Vec3::Y] {
        let axis = heading.cross(basis);
        if axis.length_squared() > DEGENERATE_EPSILON {
            return axis.normalize();
        }
    }
    // unreachable for a unit heading, which cannot be parallel to both X and Y
    heading.cross(Vec3::Z).normalize()
}

/// Scale the branch uniformly about `origin` so its final point sits exactly
/// `target_radius` from `origin`. A branch whose endpoint coincides with the
/// origin is left unscaled.
pub fn normalize_to_radius(points: &mut [Vec3], origin: Vec3, target_radius: f32) {
    let Some(&end) = points.last() else {
        return;
    };
    let length = (end - origin).length();
    if length < DEGENERATE_EPSILON {
        return;
    }

    let factor = target_radius / length;
    for point in points.iter_mut() {
        *point = origin + (*point - origin) * factor;
    }
}

/// Truncate the branch at the first point farther than `max_radius` from the
/// world origin, discarding that point and everything after it.
pub fn clip_to_radius(points: &mut Vec<Vec3>, max_radius: f32) {
    if let Some(cut) = points.iter().position(|point| point.length() > max_radius) {
        points.truncate(cut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_segments_plus_one_points() {
        let mut stream = RandomStream::new(2.0, 0.0);
        let points = grow_branch(&mut stream, Vec3::ZERO, Vec3::Y, 8, 1.0, 0.5);
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], Vec3::ZERO);
    }

    #[test]
    fn zero_segments_is_just_the_origin() {
        let mut stream = RandomStream::new(2.0, 1.0);
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let points = grow_branch(&mut stream, origin, Vec3::X, 0, 1.0, 0.5);
        assert_eq!(points, vec![origin]);
    }

    #[test]
    fn each_step_advances_by_step_length() {
        let mut stream = RandomStream::new(5.0, 0.0);
        let points = grow_branch(&mut stream, Vec3::ZERO, Vec3::X, 12, 0.7, 1.2);
        for pair in points.windows(2) {
            assert!((pair[0].distance(pair[1]) - 0.7).abs() < 1e-4);
        }
    }

    #[test]
    fn curvature_bounds_the_bend_per_step() {
        let curvature = 0.6;
        let mut stream = RandomStream::new(8.0, 0.0);
        let points = grow_branch(&mut stream, Vec3::ZERO, Vec3::Z, 20, 1.0, curvature);
        let headings: Vec<Vec3> = points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).normalize())
            .collect();
        for pair in headings.windows(2) {
            let angle = pair[0].dot(pair[1]).clamp(-1.0, 1.0).acos();
            assert!(angle <= curvature / 2.0 + 1e-3, "bend {angle} too sharp");
        }
    }

    #[test]
    fn zero_curvature_grows_straight() {
        let mut stream = RandomStream::new(3.0, 0.0);
        let points = grow_branch(&mut stream, Vec3::ZERO, Vec3::X, 5, 1.0, 0.0);
        let end = points.last().expect("end");
        assert!((*end - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn perpendicular_axis_survives_parallel_candidates() {
        let axis = perpendicular_axis(Vec3::X, Vec3::X);
        assert!(axis.dot(Vec3::X).abs() < 1e-6);
        assert!((axis.length() - 1.0).abs() < 1e-5);

        let axis = perpendicular_axis(Vec3::Y, Vec3::NEG_Y);
        assert!(axis.dot(Vec3::Y).abs() < 1e-6);
    }

    #[test]
    fn normalize_places_endpoint_at_target_radius() {
        let origin = Vec3::new(1.0, 0.0, 0.0);
        let mut points = vec![
            origin,
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(3.0, 2.0, 1.0),
        ];
        normalize_to_radius(&mut points, origin, 5.0);
        let end_distance = (points[2] - origin).length();
        assert!((end_distance - 5.0).abs() < 1e-4);
        assert_eq!(points[0], origin);
    }

    #[test]
    fn normalize_leaves_degenerate_branch_alone() {
        let origin = Vec3::ZERO;
        let mut points = vec![origin, Vec3::new(1.0, 0.0, 0.0), origin];
        let before = points.clone();
        normalize_to_radius(&mut points, origin, 10.0);
        assert_eq!(points, before);
    }

    #[test]
    fn clip_truncates_at_first_escape() {
        let mut points = vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(1.5, 0.0, 0.0),
        ];
        clip_to_radius(&mut points, 2.0);
        assert_eq!(points.len(), 2);
        for point in &points {
            assert!(point.length() <= 2.0);
        }
    }

    #[test]
    fn clip_can_empty_a_branch() {
        let mut points = vec![Vec3::new(5.0, 0.0, 0.0), Vec3::new(6.0, 0.0, 0.0)];
        clip_to_radius(&mut points, 2.0);
        assert!(points.is_empty());
    }
}
