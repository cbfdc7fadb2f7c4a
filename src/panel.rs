//! Live parameter panel and matcap preview drawn with egui.

use egui::{Align2, ColorImage, Context, TextureHandle, TextureOptions};

use crate::assets::MatcapImage;
use crate::params::AMPLITUDE_RANGE;

/// Label shown next to the amplitude slider
pub const AMPLITUDE_LABEL: &str = "noise amplitude";

/// Owner of the user-adjustable amplitude
pub struct ParameterPanel {
    amplitude: f32,
    visible: bool,
    preview: Option<TextureHandle>,
}

impl ParameterPanel {
    pub fn new(amplitude: f32) -> Self {
        Self {
            amplitude: amplitude.clamp(*AMPLITUDE_RANGE.start(), *AMPLITUDE_RANGE.end()),
            visible: true,
            preview: None,
        }
    }

    /// Current amplitude, always inside [`AMPLITUDE_RANGE`]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Write a new amplitude, clamped to the valid range
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = if amplitude.is_nan() {
            *AMPLITUDE_RANGE.start()
        } else {
            amplitude.clamp(*AMPLITUDE_RANGE.start(), *AMPLITUDE_RANGE.end())
        };
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Upload the active matcap as the preview image
    pub fn set_preview(&mut self, ctx: &Context, image: &MatcapImage) {
        let color_image = ColorImage::from_rgba_unmultiplied(
            [image.width as usize, image.height as usize],
            &image.rgba,
        );
        self.preview = Some(ctx.load_texture("matcap_preview", color_image, TextureOptions::LINEAR));
    }

    /// Draw the controls window and the preview
    ///
    /// `preview_width_px` comes from the viewport handler in physical pixels.
    pub fn show(&mut self, ctx: &Context, preview_width_px: f32) {
        if !self.visible {
            return;
        }

        egui::Window::new("Controls")
            .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                let mut amplitude = self.amplitude;
                ui.add(egui::Slider::new(&mut amplitude, AMPLITUDE_RANGE).text(AMPLITUDE_LABEL));
                if amplitude != self.amplitude {
                    self.set_amplitude(amplitude);
                }
                ui.small("F1: Toggle panel | Drag: Orbit");
            });

        if let Some(preview) = &self.preview {
            let side = preview_width_px / ctx.pixels_per_point();
            if side <= 0.0 {
                return;
            }
            let bottom_margin = ctx.screen_rect().height() * 0.1;

            egui::Area::new(egui::Id::new("matcap_preview"))
                .anchor(Align2::CENTER_BOTTOM, [0.0, -bottom_margin])
                .interactable(false)
                .show(ctx, |ui| {
                    ui.add(egui::Image::new((preview.id(), egui::vec2(side, side))));
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_amplitude() {
        let panel = ParameterPanel::new(1.0);
        assert_eq!(panel.amplitude(), 1.0);
    }

    #[test]
    fn test_writes_are_clamped() {
        let mut panel = ParameterPanel::new(1.0);

        panel.set_amplitude(2.7);
        assert_eq!(panel.amplitude(), 1.5);

        panel.set_amplitude(-0.3);
        assert_eq!(panel.amplitude(), 0.0);

        panel.set_amplitude(0.75);
        assert_eq!(panel.amplitude(), 0.75);

        panel.set_amplitude(f32::NAN);
        assert_eq!(panel.amplitude(), 0.0);
    }

    #[test]
    fn test_initial_value_clamped() {
        assert_eq!(ParameterPanel::new(9.0).amplitude(), 1.5);
    }

    #[test]
    fn test_visibility_toggle() {
        let mut panel = ParameterPanel::new(1.0);
        assert!(panel.is_visible());
        panel.toggle_visible();
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_preview_and_draw_headless() {
        let ctx = Context::default();
        let mut panel = ParameterPanel::new(1.0);
        let image = MatcapImage {
            width: 2,
            height: 2,
            rgba: vec![255; 16],
        };

        panel.set_preview(&ctx, &image);
        assert!(panel.has_preview());

        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                panel.show(ctx, 200.0);
            });
        }
        assert_eq!(panel.amplitude(), 1.0);
    }
}
