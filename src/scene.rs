//! Owned render context advanced once per frame.
//!
//! Holds everything the frame loop mutates: the displaced surface, the orbit
//! rig, the parameter panel, the viewport and the active matcap. GPU objects
//! live in [`crate::rendering::RenderSystem`] and only read from here.

use std::sync::Arc;

use glam::{EulerRot, Mat4};

use crate::assets::MatcapImage;
use crate::camera::OrbitRig;
use crate::panel::ParameterPanel;
use crate::params::{OrbitParams, RenderConfig, SurfaceParams};
use crate::surface::SurfaceSystem;
use crate::viewport::{Viewport, ViewportSize};

/// Matrices and flags the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub has_matcap: bool,
}

pub struct Scene {
    pub surface: SurfaceSystem,
    pub camera: OrbitRig,
    pub panel: ParameterPanel,
    pub viewport: Viewport,
    model: Mat4,
    matcap: Option<Arc<MatcapImage>>,
    matcap_changed: bool,
}

impl Scene {
    pub fn new(surface: &SurfaceParams, orbit: OrbitParams, render: &RenderConfig) -> Self {
        let mut scene = Self {
            surface: SurfaceSystem::new(surface),
            camera: OrbitRig::new(orbit),
            panel: ParameterPanel::new(surface.amplitude),
            viewport: Viewport::new(
                render.window_width,
                render.window_height,
                render.preview_padding,
                render.preview_fraction,
            ),
            // Lay the plane down and give it a slight twist
            model: Mat4::from_euler(
                EulerRot::XYZ,
                -0.5 * std::f32::consts::PI,
                0.0,
                0.15 * std::f32::consts::PI,
            ),
            matcap: None,
            matcap_changed: false,
        };
        scene.resize(render.window_width, render.window_height);
        scene
    }

    /// Apply a new window size to the viewport and camera
    pub fn resize(&mut self, width: u32, height: u32) -> ViewportSize {
        let size = self.viewport.resize(width, height);
        self.camera.set_viewport(size);
        tracing::debug!(width = size.width, height = size.height, "viewport resized");
        size
    }

    /// Advance one frame: camera damping, displacement, normals
    pub fn advance(&mut self, time_ms: f64) -> FrameState {
        self.camera.update();
        self.surface.update(time_ms, self.panel.amplitude());

        FrameState {
            model: self.model,
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            has_matcap: self.matcap.is_some(),
        }
    }

    /// Replace the active matcap
    pub fn set_matcap(&mut self, image: Arc<MatcapImage>) {
        self.matcap = Some(image);
        self.matcap_changed = true;
    }

    /// Matcap replaced since the last call; clears the flag
    pub fn take_matcap_change(&mut self) -> Option<Arc<MatcapImage>> {
        if std::mem::take(&mut self.matcap_changed) {
            self.matcap.clone()
        } else {
            None
        }
    }
}
