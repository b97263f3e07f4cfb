use glam::Vec3;

const SEED_WEIGHT: f64 = 12.9898;
const CELL_WEIGHT: f64 = 78.233;
const SUB_WEIGHT: f64 = 37.719;
const AMPLITUDE: f64 = 43758.5453;

/// Stateless sine-hash random source: same (seed, i, j) always yields the
/// same value in [0, 1). Computed in f64 so the stream does not depend on
/// intermediate f32 rounding.
pub fn seeded(seed: f64, i: f64, j: f64) -> f32 {
    let raw = (seed * SEED_WEIGHT + i * CELL_WEIGHT + j * SUB_WEIGHT).sin() * AMPLITUDE;
    let fract = raw - raw.floor();
    // f64 fract is < 1.0 but the cast can round up to exactly 1.0
    (fract as f32).min(0.999_999_9)
}

/// Cursor over one lane of the hash. Each independent consumer (a placer, a
/// single branch) gets its own lane so streams never overlap.
#[derive(Debug, Clone, Copy)]
pub struct RandomStream {
    seed: f64,
    lane: f64,
    cursor: u32,
}

impl RandomStream {
    pub fn new(seed: f64, lane: f64) -> Self {
        Self {
            seed,
            lane,
            cursor: 0,
        }
    }

    pub fn next(&mut self) -> f32 {
        let value = seeded(self.seed, self.lane, self.cursor as f64);
        self.cursor += 1;
        value
    }

    /// Uniform over [-1, 1).
    pub fn next_signed(&mut self) -> f32 {
        self.next() * 2.0 - 1.0
    }

    /// Random unit vector from three signed components.
    pub fn direction(&mut self) -> Vec3 {
        let v = Vec3::new(self.next_signed(), self.next_signed(), self.next_signed());
        v.try_normalize().unwrap_or(Vec3::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_is_deterministic() {
        for i in 0..32 {
            let a = seeded(7.0, i as f64, 3.0);
            let b = seeded(7.0, i as f64, 3.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn seeded_stays_in_unit_range() {
        for seed in 0..8 {
            for i in 0..64 {
                for j in 0..8 {
                    let value = seeded(seed as f64, i as f64, j as f64);
                    assert!((0.0..1.0).contains(&value), "out of range: {value}");
                }
            }
        }
    }

    #[test]
    fn distinct_seeds_give_distinct_streams() {
        let a: Vec<f32> = (0..16).map(|i| seeded(1.0, i as f64, 0.0)).collect();
        let b: Vec<f32> = (0..16).map(|i| seeded(2.0, i as f64, 0.0)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn stream_advances_its_cursor() {
        let mut stream = RandomStream::new(5.0, 2.0);
        let first = stream.next();
        let second = stream.next();
        assert_ne!(first, second);
        assert_eq!(first, seeded(5.0, 2.0, 0.0));
        assert_eq!(second, seeded(5.0, 2.0, 1.0));
    }

    #[test]
    fn direction_is_unit_length() {
        let mut stream = RandomStream::new(11.0, 0.0);
        for _ in 0..32 {
            let dir = stream.direction();
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }
}
