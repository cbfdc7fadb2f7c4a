//! Matcap Waves - a perturbed plane under a matcap, drifting with layered noise.
//!
//! Drag to orbit around the surface; the panel adjusts the noise amplitude.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use matcap_waves::assets::{AssetLoader, SourceFetcher};
use matcap_waves::camera::DragMode;
use matcap_waves::cli::Args;
use matcap_waves::params::RenderConfig;
use matcap_waves::rendering::{OverlayFrame, RenderSystem, Uniforms};
use matcap_waves::scene::Scene;

/// Scroll pixels treated as one wheel line
const PIXELS_PER_LINE: f32 = 50.0;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    egui_ctx: egui::Context,
    egui_winit: Option<egui_winit::State>,

    // Frame state
    scene: Scene,
    loader: Option<AssetLoader>,
    cursor: Vec2,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    start_time: Instant,

    exiting: bool,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args, loader: AssetLoader) -> Self {
        let render_config = args.render_config();
        let scene = Scene::new(&args.surface_params(), args.orbit_params(), &render_config);

        Self {
            window: None,
            render_system: None,
            egui_ctx: egui::Context::default(),
            egui_winit: None,
            scene,
            loader: Some(loader),
            cursor: Vec2::ZERO,
            render_config,
            start_time: Instant::now(),
            exiting: false,
            fatal: None,
        }
    }

    /// Release GPU resources before leaving the loop so no later redraw can
    /// reach a disposed surface
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            return;
        }
        tracing::info!("shutting down");
        self.exiting = true;
        self.render_system = None;
        self.egui_winit = None;
        self.loader = None;
        self.window = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.exiting {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exiting {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Matcap Waves")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fatal = Some(e.into());
                self.shutdown(event_loop);
                return;
            }
        };

        let mut render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.scene.surface.mesh,
            &self.render_config,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                tracing::error!("renderer initialization failed: {e}");
                self.fatal = Some(e.into());
                self.shutdown(event_loop);
                return;
            }
        };

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        // Initial mount counts as a resize
        let size = window.inner_size();
        let size = self.scene.resize(size.width, size.height);

        render_system.resize(size);

        self.render_system = Some(render_system);
        self.egui_winit = Some(egui_winit);
        self.window = Some(window);

        tracing::info!("running; drag to orbit, F1 toggles the panel, Esc quits");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => match key {
                KeyCode::Escape => self.shutdown(event_loop),
                KeyCode::F1 => self.scene.panel.toggle_visible(),
                _ => {}
            },
            WindowEvent::Resized(new_size) => {
                let size = self.scene.resize(new_size.width, new_size.height);
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                self.scene.camera.drag_to(self.cursor);
            }
            WindowEvent::MouseInput { state, button, .. } => match (state, button) {
                (ElementState::Pressed, MouseButton::Left) => {
                    self.scene.camera.begin_drag(DragMode::Rotate, self.cursor);
                }
                (ElementState::Pressed, MouseButton::Right) => {
                    self.scene.camera.begin_drag(DragMode::Pan, self.cursor);
                }
                (ElementState::Released, _) => self.scene.camera.end_drag(),
                _ => {}
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.scene.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    ///
    /// Order: asset completions, camera damping, displacement and normals,
    /// upload, draw.
    fn render_frame(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let (Some(render_system), Some(egui_winit)) =
            (self.render_system.as_mut(), self.egui_winit.as_mut())
        else {
            return;
        };

        if let Some(image) = self.loader.as_mut().and_then(AssetLoader::poll) {
            self.scene.set_matcap(image);
        }
        if let Some(image) = self.scene.take_matcap_change() {
            render_system.set_matcap(&image);
            self.scene.panel.set_preview(&self.egui_ctx, &image);
        }

        let time_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frame = self.scene.advance(time_ms);

        if self.scene.surface.needs_upload() {
            render_system.update_vertices(&self.scene.surface.mesh.vertices);
            self.scene.surface.mark_uploaded();
        }
        render_system.update_uniforms(&Uniforms::from_frame(&frame));

        let raw_input = egui_winit.take_egui_input(&window);
        let preview_width = self.scene.viewport.preview_width();
        let panel = &mut self.scene.panel;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            panel.show(ctx, preview_width);
        });
        egui_winit.handle_platform_output(&window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let overlay = OverlayFrame {
            paint_jobs: &paint_jobs,
            textures_delta: &full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        };

        match render_system.render(overlay) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("matcap-waves starting");

    let loader = AssetLoader::spawn(&args.matcap_sources(), Arc::new(SourceFetcher))?;

    let mut app = App::new(&args, loader);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
