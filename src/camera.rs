//! Damped orbit camera around a fixed look-at point.

use glam::{Mat4, Vec2, Vec3};

use crate::params::OrbitParams;
use crate::viewport::ViewportSize;

/// Polar angle margin keeping the camera off the poles
const POLAR_EPSILON: f32 = 1.0e-6;

/// Spherical coordinates of the eye relative to the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Angle from +Y (radians)
    pub phi: f32,
    /// Angle around +Y, measured from +Z towards +X (radians)
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Active pointer drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Orbit rig with damped rotation and polar clamping
pub struct OrbitRig {
    params: OrbitParams,
    target: Vec3,
    spherical: Spherical,
    /// Rotation still to be applied by upcoming updates
    pending: Vec2,
    pending_scale: f32,
    pending_pan: Vec3,
    drag: Option<(DragMode, Vec2)>,
    aspect: f32,
    viewport_height: f32,
}

impl OrbitRig {
    /// Create new rig from parameters
    pub fn new(params: OrbitParams) -> Self {
        let target = Vec3::from_array(params.target);
        let spherical = Spherical::from_offset(Vec3::from_array(params.eye) - target);

        Self {
            params,
            target,
            spherical,
            pending: Vec2::ZERO,
            pending_scale: 1.0,
            pending_pan: Vec3::ZERO,
            drag: None,
            aspect: 1.0,
            viewport_height: 1.0,
        }
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn polar_angle(&self) -> f32 {
        self.spherical.phi
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.spherical.to_offset()
    }

    /// Match the projection to a new viewport
    pub fn set_viewport(&mut self, size: ViewportSize) {
        self.aspect = size.aspect_ratio();
        self.viewport_height = size.height as f32;
    }

    /// Start a drag at the given cursor position (pixels)
    ///
    /// Pan drags are ignored while panning is disabled.
    pub fn begin_drag(&mut self, mode: DragMode, cursor: Vec2) {
        if mode == DragMode::Pan && !self.params.enable_pan {
            return;
        }
        self.drag = Some((mode, cursor));
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Feed a cursor move; accumulates rotation or pan for the active drag
    pub fn drag_to(&mut self, cursor: Vec2) {
        let Some((mode, last)) = self.drag else {
            return;
        };
        let delta = cursor - last;
        self.drag = Some((mode, cursor));

        match mode {
            DragMode::Rotate => self.rotate_by_pixels(delta),
            DragMode::Pan => self.pan_by_pixels(delta),
        }
    }

    /// Queue a rotation from a pixel delta; a full viewport height is one turn
    pub fn rotate_by_pixels(&mut self, delta: Vec2) {
        let turn = std::f32::consts::TAU * self.params.rotate_speed / self.viewport_height;
        self.pending.x -= turn * delta.x;
        self.pending.y -= turn * delta.y;
    }

    /// Queue a zoom from scroll lines (positive scrolls in)
    pub fn zoom(&mut self, lines: f32) {
        if !self.params.enable_zoom {
            return;
        }
        self.pending_scale *= 0.95_f32.powf(self.params.zoom_speed * lines);
    }

    fn pan_by_pixels(&mut self, delta: Vec2) {
        if !self.params.enable_pan {
            return;
        }
        // Scale so the target plane moves with the cursor
        let half_fov = (self.params.fov_degrees.to_radians() / 2.0).tan();
        let world_per_pixel = 2.0 * self.spherical.radius * half_fov / self.viewport_height;

        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        self.pending_pan += (-right * delta.x + up * delta.y) * world_per_pixel;
    }

    /// Advance one frame: apply the damped share of pending motion and clamp
    pub fn update(&mut self) {
        let factor = if self.params.enable_damping {
            self.params.damping_factor
        } else {
            1.0
        };

        self.spherical.theta += self.pending.x * factor;
        self.spherical.phi += self.pending.y * factor;

        self.spherical.phi = self
            .spherical
            .phi
            .clamp(self.params.min_polar, self.params.max_polar)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);

        self.spherical.radius = (self.spherical.radius * self.pending_scale)
            .clamp(self.params.min_distance, self.params.max_distance);
        self.pending_scale = 1.0;

        if self.params.enable_damping {
            self.target += self.pending_pan * factor;
            self.pending_pan *= 1.0 - factor;
            self.pending *= 1.0 - factor;
        } else {
            self.target += self.pending_pan;
            self.pending_pan = Vec3::ZERO;
            self.pending = Vec2::ZERO;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            self.aspect.max(1e-3),
            self.params.near,
            self.params.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn rig() -> OrbitRig {
        let mut rig = OrbitRig::new(OrbitParams::default());
        rig.set_viewport(ViewportSize::clamped(800, 600));
        rig
    }

    fn assert_polar_in_band(rig: &OrbitRig) {
        let phi = rig.polar_angle();
        assert!(
            (0.4 * PI - 1e-5..=0.6 * PI + 1e-5).contains(&phi),
            "polar angle {} outside band",
            phi
        );
    }

    #[test]
    fn test_initial_eye_matches_params() {
        let rig = rig();
        let eye = rig.eye();
        assert!((eye - Vec3::new(0.0, 1.0, 10.0)).length() < 1e-4, "{:?}", eye);
    }

    #[test]
    fn test_spherical_round_trip() {
        let offset = Vec3::new(3.0, -2.0, 4.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-4);
    }

    #[test]
    fn test_polar_clamped_after_drags() {
        let mut rig = rig();
        let drags = [
            Vec2::new(0.0, 5000.0),
            Vec2::new(300.0, -9000.0),
            Vec2::new(-40.0, 12.0),
            Vec2::new(0.0, -3.0),
            Vec2::new(0.0, 20000.0),
        ];

        let mut cursor = Vec2::new(400.0, 300.0);
        rig.begin_drag(DragMode::Rotate, cursor);
        for delta in drags {
            cursor += delta;
            rig.drag_to(cursor);
            for _ in 0..30 {
                rig.update();
                assert_polar_in_band(&rig);
            }
        }
        rig.end_drag();

        for _ in 0..500 {
            rig.update();
            assert_polar_in_band(&rig);
        }
    }

    #[test]
    fn test_damping_spreads_rotation_over_frames() {
        let mut rig = rig();
        let start = rig.spherical().theta;
        rig.rotate_by_pixels(Vec2::new(-60.0, 0.0));

        rig.update();
        let first_step = rig.spherical().theta - start;
        let total = std::f32::consts::TAU / 600.0 * 60.0;
        assert!((first_step - total * 0.05).abs() < 1e-5);

        for _ in 0..400 {
            rig.update();
        }
        let settled = rig.spherical().theta - start;
        assert!((settled - total).abs() < 1e-3, "{} vs {}", settled, total);
    }

    #[test]
    fn test_without_damping_rotation_is_immediate() {
        let mut rig = OrbitRig::new(OrbitParams {
            enable_damping: false,
            ..OrbitParams::default()
        });
        rig.set_viewport(ViewportSize::clamped(800, 600));
        let start = rig.spherical().theta;
        rig.rotate_by_pixels(Vec2::new(-30.0, 0.0));
        rig.update();
        let moved = rig.spherical().theta - start;
        rig.update();
        assert_eq!(rig.spherical().theta - start, moved);
    }

    #[test]
    fn test_zoom_and_pan_disabled_by_default() {
        let mut rig = rig();
        let eye = rig.eye();

        rig.zoom(10.0);
        rig.begin_drag(DragMode::Pan, Vec2::ZERO);
        assert!(rig.drag.is_none());
        rig.drag_to(Vec2::new(100.0, 100.0));
        for _ in 0..100 {
            rig.update();
        }

        assert!((rig.eye() - eye).length() < 1e-4);
        assert_eq!(rig.target, Vec3::ZERO);
    }

    #[test]
    fn test_pan_when_enabled() {
        let mut rig = OrbitRig::new(OrbitParams {
            enable_pan: true,
            enable_damping: false,
            ..OrbitParams::default()
        });
        rig.set_viewport(ViewportSize::clamped(800, 600));
        let offset = rig.eye() - rig.target;

        rig.begin_drag(DragMode::Pan, Vec2::new(400.0, 300.0));
        rig.drag_to(Vec2::new(500.0, 300.0));
        rig.update();

        // Dragging right slides the scene right, so the target moves to -X
        assert!(rig.target.x < -1.0, "{:?}", rig.target);
        assert!(rig.target.y.abs() < 1e-4 && rig.target.z.abs() < 1e-4);
        assert!((rig.eye() - rig.target - offset).length() < 1e-4);

        // Pan was applied in full; later frames leave it alone
        let panned = rig.target;
        rig.update();
        assert_eq!(rig.target, panned);
    }

    #[test]
    fn test_zoom_when_enabled() {
        let mut rig = OrbitRig::new(OrbitParams {
            enable_zoom: true,
            ..OrbitParams::default()
        });
        let radius = rig.spherical().radius;
        rig.zoom(3.0);
        rig.update();
        assert!(rig.spherical().radius < radius);
    }

    #[test]
    fn test_projection_tracks_aspect() {
        let mut rig = rig();
        assert!((rig.aspect() - 800.0 / 600.0).abs() < 1e-6);
        rig.set_viewport(ViewportSize::clamped(400, 400));
        assert_eq!(rig.aspect(), 1.0);
        let proj = rig.projection_matrix();
        assert!(!proj.col(0).x.is_nan());
        assert_ne!(proj, Mat4::IDENTITY);
    }
}
