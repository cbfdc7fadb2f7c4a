//! Noise field sampled by the surface displacement.
//!
//! Wraps improved Perlin noise from the `noise` crate. The permutation table
//! is fixed by the seed, so sampling is a pure function of the inputs.

use noise::{NoiseFn, Perlin};

/// Deterministic, continuous scalar field over 3D coordinates
///
/// The permutation comes from `noise::Perlin`'s seeded shuffle rather than
/// Ken Perlin's reference table, so the surface shape differs from other
/// improved-noise implementations even at seed 0.
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Create new noise field with seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample the field at a point
    ///
    /// Returns value in range [-1, 1], zero on integer lattice points
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_value() {
        let a = NoiseField::new(7);
        let b = NoiseField::new(7);
        for i in 0..50 {
            let x = i as f64 * 0.37;
            let y = i as f64 * -0.21;
            assert_eq!(a.sample(x, y, 0.0), b.sample(x, y, 0.0));
        }
    }

    #[test]
    fn test_lattice_points_are_zero() {
        let field = NoiseField::new(0);
        assert_eq!(field.sample(0.0, 0.0, 0.0), 0.0);
        assert_eq!(field.sample(3.0, -2.0, 0.0), 0.0);
    }

    #[test]
    fn test_matches_recorded_samples() {
        // Both layers of the default displacement at (0.3, 0.7), t = 0
        let field = NoiseField::new(0);
        let combined = field.sample(0.15, 0.35, 0.0) - 1.5 * field.sample(0.06, 0.14, 0.0);
        assert!((combined - 0.2600375).abs() < 1e-6, "got {}", combined);
    }

    #[test]
    fn test_output_bounded() {
        let field = NoiseField::new(0);
        for i in 0..200 {
            let v = field.sample(i as f64 * 0.173, i as f64 * 0.091, 0.0);
            assert!((-1.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }
}
