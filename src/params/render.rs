//! Window and renderer configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (pixels)
    pub window_width: u32,

    /// Initial window height (pixels)
    pub window_height: u32,

    /// Multisample anti-aliasing toggle (4x when enabled)
    pub antialias: bool,

    /// Clear color behind the mesh (linear RGBA)
    pub clear_color: [f64; 4],

    /// Padding around the matcap preview (pixels)
    pub preview_padding: f32,

    /// Preview width as a fraction of the smaller window dimension
    pub preview_fraction: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            antialias: true,
            clear_color: [0.96, 0.96, 0.96, 1.0],
            preview_padding: 3.0,
            preview_fraction: 0.8,
        }
    }
}

impl RenderConfig {
    /// MSAA sample count used by the scene pass
    pub fn sample_count(&self) -> u32 {
        if self.antialias {
            4
        } else {
            1
        }
    }
}
