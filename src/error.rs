//! Error types for asset loading and GPU setup.

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("HTTP request for {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Matcap slot {slot} is outside the {count} requested textures")]
    SlotOutOfRange { slot: usize, count: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}
