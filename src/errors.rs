//! Error Types
//!
//! The main error type [`GlowlineError`] covers all failure modes:
//! GPU initialization, shader compilation, schema validation, and the
//! windowed app layer. Shader compile/link failures are **fatal** and carry
//! the driver's diagnostic log verbatim; there is no silent fallback.

use thiserror::Error;

/// The main error type for the glowline renderer.
#[derive(Error, Debug)]
pub enum GlowlineError {
    // ========================================================================
    // GPU Initialization
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    // ========================================================================
    // Shaders & Pipeline Construction
    // ========================================================================
    /// A shader failed to compile or validate. The renderer cannot start
    /// without every pass shader, so this aborts initialization.
    #[error("Shader '{name}' failed to compile:\n{log}")]
    ShaderCompileFailed {
        /// Logical shader name (e.g. "line", "blur").
        name: String,
        /// Driver diagnostic log, surfaced verbatim.
        log: String,
    },

    /// A shader template failed to load or render.
    #[error("Shader template '{name}': {message}")]
    ShaderTemplateFailed {
        /// Logical shader name.
        name: String,
        /// Template engine diagnostic.
        message: String,
    },

    /// A vertex attribute declares a component count the packer cannot
    /// serialize (only scalar through vec4 are supported).
    #[error("Unhandled attribute type for '{name}': {components} components")]
    UnsupportedAttribute {
        /// Attribute name from the schema.
        name: String,
        /// Declared component count.
        components: u32,
    },

    /// Render settings are internally inconsistent (e.g. blur radius and
    /// weight sequences of different lengths).
    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),

    // ========================================================================
    // App Layer
    // ========================================================================
    /// Window system error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),
}

/// Alias for `Result<T, GlowlineError>`.
pub type Result<T> = std::result::Result<T, GlowlineError>;
