//! Matcap waves library - noise-displaced plane with orbit camera

pub mod assets;
pub mod camera;
pub mod cli;
pub mod error;
pub mod noise;
pub mod panel;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod surface;
pub mod viewport;
