//! Noise-displaced plane: mesh buffer, displacement kernel and the per-frame
//! system that ties them to the amplitude parameter.

mod displacement;
mod mesh;
mod system;

pub use displacement::Displacement;
pub use mesh::{PlaneMesh, Vertex};
pub use system::SurfaceSystem;
