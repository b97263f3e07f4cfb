use glam::Vec3;

use crate::graph::Sample;

/// Catmull-Rom spline through a fixed set of control points, with clamped
/// (duplicated) endpoints. Two control points degenerate to linear
/// interpolation so short branches sample exactly along their chord.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<Vec3>,
}

impl Curve {
    /// Callers guarantee at least 2 points; shorter branches are discarded
    /// before a curve is ever built.
    pub fn new(points: Vec<Vec3>) -> Self {
        debug_assert!(points.len() >= 2, "curve needs at least 2 points");
        Self { points }
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Position at parameter t in [0, 1]; t is clamped.
    pub fn point(&self, t: f32) -> Vec3 {
        if self.points.len() == 2 {
            return self.points[0].lerp(self.points[1], t.clamp(0.0, 1.0));
        }
        let (i0, i1, i2, i3, u) = self.segment(t);
        let (p0, p1, p2, p3) = (
            self.points[i0],
            self.points[i1],
            self.points[i2],
            self.points[i3],
        );

        let u2 = u * u;
        let u3 = u2 * u;
        0.5 * (2.0 * p1
            + (p2 - p0) * u
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
    }

    /// Unit tangent at parameter t in [0, 1]; t is clamped.
    pub fn tangent(&self, t: f32) -> Vec3 {
        if self.points.len() == 2 {
            let chord = self.points[1] - self.points[0];
            return chord.try_normalize().unwrap_or(Vec3::Y);
        }
        let (i0, i1, i2, i3, u) = self.segment(t);
        let (p0, p1, p2, p3) = (
            self.points[i0],
            self.points[i1],
            self.points[i2],
            self.points[i3],
        );

        let u2 = u * u;
        let derivative = 0.5
            * ((p2 - p0)
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * (2.0 * u)
                + (3.0 * p1 - p0 - 3.0 * p2 + p3) * (3.0 * u2));
        derivative
            .try_normalize()
            .unwrap_or_else(|| (p2 - p1).try_normalize().unwrap_or(Vec3::Y))
    }

    /// Resample into `resolution` evenly-parameterized samples with progress
    /// i / (resolution - 1). Resolution >= 2 is enforced by configuration
    /// validation upstream.
    pub fn sample(&self, resolution: u32) -> Vec<Sample> {
        let resolution = resolution.max(2);
        let last = (resolution - 1) as f32;
        (0..resolution)
            .map(|i| {
                let t = i as f32 / last;
                Sample {
                    position: self.point(t).to_array(),
                    progress: t,
                }
            })
            .collect()
    }

    /// Map t onto a segment: clamped neighbor indices plus the local
    /// parameter within the segment.
    fn segment(&self, t: f32) -> (usize, usize, usize, usize, f32) {
        let segment_count = self.points.len() - 1;
        let scaled = t.clamp(0.0, 1.0) * segment_count as f32;
        let index = (scaled.floor() as usize).min(segment_count - 1);
        let u = scaled - index as f32;

        let i0 = index.saturating_sub(1);
        let i1 = index;
        let i2 = index + 1;
        let i3 = (index + 2).min(self.points.len() - 1);
        (i0, i1, i2, i3, u)
    }
}
