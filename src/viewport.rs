//! Window size tracking for the surface, camera and preview panel.

/// Drawable size in physical pixels, never smaller than 1x1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    /// Clamp raw window dimensions to at least one pixel each
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Current viewport plus derived preview sizing
#[derive(Debug, Clone)]
pub struct Viewport {
    size: ViewportSize,
    preview_padding: f32,
    preview_fraction: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, preview_padding: f32, preview_fraction: f32) -> Self {
        Self {
            size: ViewportSize::clamped(width, height),
            preview_padding,
            preview_fraction,
        }
    }

    /// Replace the current size; returns the clamped size actually applied
    ///
    /// Safe to call repeatedly with the same dimensions.
    pub fn resize(&mut self, width: u32, height: u32) -> ViewportSize {
        self.size = ViewportSize::clamped(width, height);
        self.size
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    /// Width of the matcap preview (pixels)
    pub fn preview_width(&self) -> f32 {
        let shortest = self.size.width.min(self.size.height) as f32;
        (self.preview_fraction * shortest - 4.0 * self.preview_padding).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_sequence_has_no_stale_size() {
        let mut viewport = Viewport::new(1280, 720, 3.0, 0.8);

        let first = viewport.resize(800, 600);
        assert_eq!(first, ViewportSize { width: 800, height: 600 });
        assert_eq!(viewport.size(), first);

        let second = viewport.resize(400, 300);
        assert_eq!(second, ViewportSize { width: 400, height: 300 });
        assert_eq!(viewport.size(), second);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut viewport = Viewport::new(10, 10, 3.0, 0.8);
        let a = viewport.resize(640, 480);
        let preview = viewport.preview_width();
        let b = viewport.resize(640, 480);
        assert_eq!(a, b);
        assert_eq!(viewport.preview_width(), preview);
    }

    #[test]
    fn test_zero_dimensions_clamp_to_one() {
        let mut viewport = Viewport::new(0, 0, 3.0, 0.8);
        assert_eq!(viewport.size(), ViewportSize { width: 1, height: 1 });
        let size = viewport.resize(0, 300);
        assert_eq!(size, ViewportSize { width: 1, height: 300 });
        assert!(size.aspect_ratio().is_finite());
    }

    #[test]
    fn test_preview_width() {
        let viewport = Viewport::new(800, 600, 3.0, 0.8);
        assert_eq!(viewport.preview_width(), 0.8 * 600.0 - 12.0);

        let tiny = Viewport::new(5, 5, 3.0, 0.8);
        assert_eq!(tiny.preview_width(), 0.0);
    }
}
