//! Error types for lorenz-wave.
//!
//! The animation core is infallible. Errors come from GPU setup, window
//! creation, configuration and the optional PNG output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during GPU initialization or readback.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Surface reports no usable texture format.
    #[error("Surface does not support any texture format on this adapter")]
    NoSurfaceFormat,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// Failed to map buffer for reading.
    #[error("Failed to map GPU buffer: {0}")]
    BufferMapping(String),
}

/// Errors that can occur while writing captured frames.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Output directory could not be created.
    #[error("Failed to create capture directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Pixel buffer does not match the frame dimensions.
    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    /// PNG encoding or file write failed.
    #[error("Failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

/// Invalid viewer settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("At least one worker thread is required")]
    ZeroThreads,
    #[error("Interpolation steps must be at least 1")]
    ZeroSteps,
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("Window size must be non-zero, got {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },
}

/// Errors that can occur when running the viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Settings rejected before startup.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Frame capture could not be set up.
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),
}
