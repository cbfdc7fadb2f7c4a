//! Layered noise displacement kernel.

use super::mesh::Vertex;
use crate::noise::NoiseField;
use crate::params::NoiseLayer;

/// Maps a static plane coordinate and a timestamp to a z offset
pub struct Displacement {
    field: NoiseField,
    layers: Vec<NoiseLayer>,
}

impl Displacement {
    pub fn new(field: NoiseField, layers: Vec<NoiseLayer>) -> Self {
        Self { field, layers }
    }

    /// Offset of the vertex at `(x, y)` at time `time_ms`
    ///
    /// With the default layers this is
    /// `amplitude * (N(0.5x + k1 t, 0.5y + k1 t, 0) - 1.5 N(0.2x - k2 t, 0.2y + k2 t, 0))`.
    pub fn offset(&self, x: f32, y: f32, time_ms: f64, amplitude: f32) -> f32 {
        let (x, y) = (x as f64, y as f64);

        let sum: f64 = self
            .layers
            .iter()
            .map(|layer| {
                let sx = layer.frequency * x + layer.drift[0] * time_ms;
                let sy = layer.frequency * y + layer.drift[1] * time_ms;
                layer.weight * self.field.sample(sx, sy, 0.0)
            })
            .sum();

        (sum * amplitude as f64) as f32
    }

    /// Rewrite the z component of every vertex in place
    ///
    /// x and y are read back from the buffer unchanged, so the grid keeps
    /// its layout frame after frame.
    pub fn apply(&self, vertices: &mut [Vertex], time_ms: f64, amplitude: f32) {
        for vertex in vertices.iter_mut() {
            let [x, y, _] = vertex.position;
            vertex.position[2] = self.offset(x, y, time_ms, amplitude);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SurfaceParams;

    fn default_displacement() -> Displacement {
        let params = SurfaceParams::default();
        Displacement::new(NoiseField::new(params.noise_seed), params.layers)
    }

    fn sample_points() -> Vec<(f32, f32)> {
        (0..40)
            .map(|i| {
                let f = i as f32;
                (-2.5 + f * 0.131, 2.0 - f * 0.097)
            })
            .collect()
    }

    #[test]
    fn test_offset_is_deterministic() {
        let a = default_displacement();
        let b = default_displacement();
        for (x, y) in sample_points() {
            for t in [0.0, 16.7, 1234.5, 98765.0] {
                assert_eq!(a.offset(x, y, t, 1.0), b.offset(x, y, t, 1.0));
            }
        }
    }

    #[test]
    fn test_offset_matches_layer_formula() {
        let d = default_displacement();
        let field = NoiseField::new(0);
        let (x, y, t) = (1.3_f32, -0.7_f32, 4321.0_f64);
        let (xf, yf) = (x as f64, y as f64);

        let expected = field.sample(0.5 * xf + 0.0005 * t, 0.5 * yf + 0.0005 * t, 0.0)
            - 1.5 * field.sample(0.2 * xf - 0.0002 * t, 0.2 * yf + 0.0002 * t, 0.0);

        let got = d.offset(x, y, t, 1.0) as f64;
        assert!((got - expected).abs() < 1e-6, "{} vs {}", got, expected);
    }

    #[test]
    fn test_offset_matches_recorded_samples() {
        let d = default_displacement();
        let recorded = [
            ((0.3, 0.7, 0.0), 0.2600375_f32),
            ((1.1, -1.9, 1000.0), 0.24235755),
            ((-2.0, 1.5, 12345.0), -0.061719578),
        ];
        for ((x, y, t), expected) in recorded {
            let got = d.offset(x, y, t, 1.0);
            assert!(
                (got - expected).abs() < 1e-6,
                "offset({}, {}, {}) = {}, recorded {}",
                x,
                y,
                t,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_amplitude_scales_linearly() {
        let d = default_displacement();
        for (x, y) in sample_points() {
            let t = 2500.0;
            let single = d.offset(x, y, t, 0.6);
            let double = d.offset(x, y, t, 1.2);
            assert!(
                (double - 2.0 * single).abs() < 1e-5,
                "{} != 2 * {}",
                double,
                single
            );
        }
    }

    #[test]
    fn test_zero_amplitude_is_flat() {
        let d = default_displacement();
        for (x, y) in sample_points() {
            for t in [0.0, 500.0, 1.0e6] {
                assert_eq!(d.offset(x, y, t, 0.0), 0.0);
            }
        }
    }

    #[test]
    fn test_apply_only_touches_z() {
        let d = default_displacement();
        let mut vertices: Vec<Vertex> = sample_points()
            .into_iter()
            .map(|(x, y)| Vertex {
                position: [x, y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [0.0, 0.0],
            })
            .collect();
        let before = vertices.clone();

        d.apply(&mut vertices, 777.0, 1.0);

        for (after, before) in vertices.iter().zip(&before) {
            assert_eq!(after.position[0], before.position[0]);
            assert_eq!(after.position[1], before.position[1]);
            assert_eq!(
                after.position[2],
                d.offset(before.position[0], before.position[1], 777.0, 1.0)
            );
        }
    }

    #[test]
    fn test_surface_moves_over_time() {
        let d = default_displacement();
        let moved = sample_points()
            .into_iter()
            .any(|(x, y)| d.offset(x, y, 0.0, 1.0) != d.offset(x, y, 3000.0, 1.0));
        assert!(moved);
    }
}
