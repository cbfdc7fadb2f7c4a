//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers live here with:
//! - Units (plane units, milliseconds, radians, pixels)
//! - Documented ranges and meanings
//! - Defaults matching the reference look of the demo

mod assets;
mod camera;
mod render;
mod surface;

// Re-export all types
pub use assets::{MatcapSources, DEFAULT_MATCAP_URLS};
pub use camera::OrbitParams;
pub use render::RenderConfig;
pub use surface::{NoiseLayer, SurfaceParams, AMPLITUDE_RANGE};
