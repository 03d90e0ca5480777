//! Error types for plexus.
//!
//! This module provides error types for configuration loading, drawing
//! surface acquisition, and (on native targets) window and GPU setup.

use std::fmt;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// The file is not valid JSON for the configuration schema.
    Parse(serde_json::Error),
    /// A value is out of its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors related to the drawing surface.
#[derive(Debug)]
pub enum SurfaceError {
    /// The host could not provide a 2D drawing surface.
    Unavailable(String),
    /// Failed to encode a canvas snapshot.
    Encode(image::ImageError),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Unavailable(what) => write!(f, "Drawing surface unavailable: {}", what),
            SurfaceError::Encode(e) => write!(f, "Failed to write snapshot: {}", e),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurfaceError::Unavailable(_) => None,
            SurfaceError::Encode(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for SurfaceError {
    fn from(e: image::ImageError) -> Self {
        SurfaceError::Encode(e)
    }
}

/// Errors that can occur during GPU initialization.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for presenting.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// The surface offers no texture format to render into.
    UnsupportedSurface,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

#[cfg(not(target_arch = "wasm32"))]
impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with Vulkan/Metal/DX12 support."),
            GpuError::UnsupportedSurface => write!(f, "Surface reports no supported texture formats"),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter | GpuError::UnsupportedSurface => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running a windowed simulation.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub enum SimulationError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// Configuration was rejected.
    Config(ConfigError),
}

#[cfg(not(target_arch = "wasm32"))]
impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            SimulationError::Window(e) => write!(f, "Failed to create window: {}", e),
            SimulationError::Gpu(e) => write!(f, "GPU error: {}", e),
            SimulationError::Config(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::EventLoop(e) => Some(e),
            SimulationError::Window(e) => Some(e),
            SimulationError::Gpu(e) => Some(e),
            SimulationError::Config(e) => Some(e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<winit::error::EventLoopError> for SimulationError {
    fn from(e: winit::error::EventLoopError) -> Self {
        SimulationError::EventLoop(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<winit::error::OsError> for SimulationError {
    fn from(e: winit::error::OsError) -> Self {
        SimulationError::Window(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<GpuError> for SimulationError {
    fn from(e: GpuError) -> Self {
        SimulationError::Gpu(e)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid("link_distance must be > 0".into());
        assert_eq!(err.to_string(), "Invalid config: link_distance must be > 0");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_parse_error_has_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_surface_unavailable_display() {
        let err = SurfaceError::Unavailable("no element with id `bg`".into());
        assert!(err.to_string().contains("no element with id `bg`"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_unsupported_surface_is_not_missing_adapter() {
        let err = GpuError::UnsupportedSurface;
        assert!(err.to_string().contains("no supported texture formats"));
        assert!(!err.to_string().contains("adapter"));
        assert!(err.source().is_none());
    }
}
