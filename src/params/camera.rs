//! Orbit camera configuration.

use std::f32::consts::PI;

/// Orbit rig parameters
#[derive(Debug, Clone)]
pub struct OrbitParams {
    /// Initial eye position (plane units)
    pub eye: [f32; 3],

    /// Look-at target the rig orbits around (plane units)
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (plane units)
    pub near: f32,

    /// Far clipping plane (plane units)
    pub far: f32,

    /// Lowest allowed polar angle, measured from +Y (radians)
    pub min_polar: f32,

    /// Highest allowed polar angle, measured from +Y (radians)
    pub max_polar: f32,

    /// Smooth rotation with decaying angular velocity
    pub enable_damping: bool,

    /// Fraction of the pending rotation applied per frame when damping
    pub damping_factor: f32,

    /// Rotation speed multiplier for drag input
    pub rotate_speed: f32,

    /// Scroll zoom toggle
    pub enable_zoom: bool,

    /// Zoom speed multiplier (scale per scroll line is 0.95^speed)
    pub zoom_speed: f32,

    /// Distance limits when zooming (plane units)
    pub min_distance: f32,
    pub max_distance: f32,

    /// Secondary-button pan toggle
    pub enable_pan: bool,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            eye: [0.0, 1.0, 10.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near: 1.0,
            far: 50.0,
            // Keep the view near the horizon: never from straight above or below
            min_polar: 0.4 * PI,
            max_polar: 0.6 * PI,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            enable_zoom: false,
            zoom_speed: 1.0,
            min_distance: 2.0,
            max_distance: 30.0,
            enable_pan: false,
        }
    }
}
