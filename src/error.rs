//! Error types for Astra

use thiserror::Error;

/// Main error type for Astra operations
#[derive(Error, Debug)]
pub enum Error {
    /// No GPU adapter can drive the requested surface
    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    /// Surface creation failed (window or canvas unusable)
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// Device request failed
    #[error("Failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Any other rendering failure
    #[error("Render error: {0}")]
    Render(String),

    /// Window system failure
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// PORT is not a TCP port number
    #[error("Invalid port '{0}': expected a number between 0 and 65535")]
    InvalidPort(String),

    /// NODE_ENV names neither development nor production
    #[error("Invalid environment '{0}': expected 'development' or 'production'")]
    InvalidEnvironment(String),

    /// Scene time is not a finite number of seconds
    #[error("Invalid scene time {0}: expected a finite number of seconds")]
    InvalidTime(f32),

    /// Canvas lookup failure (web only)
    #[error("Canvas not found: {0}")]
    CanvasNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for Astra operations
pub type Result<T> = std::result::Result<T, Error>;
