//! Render target pool
//!
//! Owns the ladder of offscreen color targets the bloom pipeline ping-pongs
//! through, all sized to the output and sharing one format and one sampler.
//! Targets are recreated together on resize; [`TargetPool::ensure_size`]
//! reports whether that happened so passes know to rebuild their bind
//! groups.

use crate::renderer::OFFSCREEN_FORMAT;

struct Target {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// Fixed-slot pool of same-sized offscreen render targets.
pub struct TargetPool {
    targets: Vec<Target>,
    sampler: wgpu::Sampler,
    width: u32,
    height: u32,
}

impl TargetPool {
    /// Creates an empty pool; the first [`TargetPool::ensure_size`]
    /// allocates the target slots.
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Target Pool Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });
        Self {
            targets: Vec::new(),
            sampler,
            width: 0,
            height: 0,
        }
    }

    /// Ensures `count` targets exist at `width` × `height`. Returns `true`
    /// when targets were (re)created, which invalidates bind groups built
    /// over previous views.
    pub fn ensure_size(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
        count: usize,
    ) -> bool {
        let width = width.max(1);
        let height = height.max(1);
        if self.width == width && self.height == height && self.targets.len() == count {
            return false;
        }

        log::debug!("target pool: {count} targets at {width}x{height}");
        self.targets = (0..count)
            .map(|i| {
                let texture = device.create_texture(&wgpu::TextureDescriptor {
                    label: Some(&format!("Offscreen Target {i}")),
                    size: wgpu::Extent3d {
                        width,
                        height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: OFFSCREEN_FORMAT,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                        | wgpu::TextureUsages::TEXTURE_BINDING,
                    view_formats: &[],
                });
                let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
                Target {
                    _texture: texture,
                    view,
                }
            })
            .collect();
        self.width = width;
        self.height = height;
        true
    }

    /// View for a slot. Panics on an out-of-range slot; slot indices are
    /// compile-time constants in the render graph.
    #[must_use]
    pub fn view(&self, slot: usize) -> &wgpu::TextureView {
        &self.targets[slot].view
    }

    /// The shared clamp-to-edge linear sampler.
    #[must_use]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Current target size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
