//! wgpu Context
//!
//! [`WgpuContext`] holds the core GPU handles: device, queue, and an
//! optional presentation surface. The windowed constructor configures a
//! surface for a winit window; the headless constructor is used by tests
//! and offscreen rendering.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{GlowlineError, Result};

/// Core wgpu context holding GPU handles.
pub struct WgpuContext {
    /// The wgpu device for GPU operations.
    pub device: wgpu::Device,
    /// The command queue for submitting work.
    pub queue: wgpu::Queue,
    /// The window surface, when presenting to a window.
    pub surface: Option<wgpu::Surface<'static>>,
    /// Surface configuration, when a surface exists.
    pub config: Option<wgpu::SurfaceConfiguration>,
}

impl WgpuContext {
    /// Creates a context with a presentation surface for `window`.
    pub async fn new<W>(window: W, width: u32, height: u32) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(|e| GlowlineError::AdapterRequestFailed(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GlowlineError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        let config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .ok_or_else(|| {
                GlowlineError::AdapterRequestFailed("Surface not supported by adapter".to_string())
            })?;
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface: Some(surface),
            config: Some(config),
        })
    }

    /// Creates a context without a surface, for offscreen rendering.
    pub async fn new_headless() -> Result<Self> {
        let instance = wgpu::Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GlowlineError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        Ok(Self {
            device,
            queue,
            surface: None,
            config: None,
        })
    }

    /// Reconfigures the surface after a window resize. No-op when headless
    /// or when either dimension is zero (minimized window).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let (Some(surface), Some(config)) = (&self.surface, &mut self.config) {
            config.width = width;
            config.height = height;
            surface.configure(&self.device, config);
        }
    }

    /// Surface color format, when a surface exists.
    #[must_use]
    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        self.config.as_ref().map(|c| c.format)
    }

    /// Current surface dimensions, when a surface exists.
    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.config.as_ref().map(|c| (c.width, c.height))
    }
}
