//! Plane tessellation and noise displacement parameters.

use std::ops::RangeInclusive;

/// Valid range of the user-facing noise amplitude.
pub const AMPLITUDE_RANGE: RangeInclusive<f32> = 0.0..=1.5;

/// One layer of the displacement sum.
///
/// Samples `N(frequency * x + drift[0] * t, frequency * y + drift[1] * t, 0)`
/// and scales the result by `weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseLayer {
    /// Spatial frequency (cycles per plane unit)
    pub frequency: f64,

    /// Drift of the sample point along x and y (plane units per millisecond)
    pub drift: [f64; 2],

    /// Signed contribution of this layer to the offset
    pub weight: f64,
}

/// Displaced plane parameters
#[derive(Debug, Clone)]
pub struct SurfaceParams {
    /// Plane width (plane units)
    pub width: f32,

    /// Plane height (plane units)
    pub height: f32,

    /// Segments per plane unit; the grid has `width * resolution` columns
    /// and `height * resolution` rows of cells
    pub resolution: u32,

    /// Initial noise amplitude (dimensionless, within [`AMPLITUDE_RANGE`])
    pub amplitude: f32,

    /// Noise layers summed per vertex
    pub layers: Vec<NoiseLayer>,

    /// Perlin permutation seed
    pub noise_seed: u32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 4.0,
            resolution: 12,
            amplitude: 1.0,
            layers: vec![
                // Fine ripples drifting diagonally
                NoiseLayer {
                    frequency: 0.5,
                    drift: [0.0005, 0.0005],
                    weight: 1.0,
                },
                // Broad swell drifting against the ripples, subtracted
                NoiseLayer {
                    frequency: 0.2,
                    drift: [-0.0002, 0.0002],
                    weight: -1.5,
                },
            ],
            noise_seed: 0,
        }
    }
}

impl SurfaceParams {
    /// Number of cell columns along x
    pub fn columns(&self) -> usize {
        (self.width * self.resolution as f32).round().max(1.0) as usize
    }

    /// Number of cell rows along y
    pub fn rows(&self) -> usize {
        (self.height * self.resolution as f32).round().max(1.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_dimensions() {
        let params = SurfaceParams::default();
        assert_eq!(params.columns(), 60);
        assert_eq!(params.rows(), 48);
    }

    #[test]
    fn test_default_amplitude_in_range() {
        let params = SurfaceParams::default();
        assert!(AMPLITUDE_RANGE.contains(&params.amplitude));
    }

    #[test]
    fn test_zero_resolution_still_has_one_cell() {
        let params = SurfaceParams {
            resolution: 0,
            ..SurfaceParams::default()
        };
        assert_eq!(params.columns(), 1);
        assert_eq!(params.rows(), 1);
    }
}
