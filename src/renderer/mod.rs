//! Renderer
//!
//! The render graph is fixed and small, so it is written out as a straight
//! sequence rather than a general graph:
//!
//! ```text
//! line pass ──▶ scene target
//! blit      ──▶ source target (pristine bloom input)
//! for each radius r[i]:
//!     blur H (source or level[i-1]) ──▶ ping
//!     blur V (ping)                 ──▶ pong
//!     blit   (pong)                 ──▶ level[i]
//! composite (all levels)  ──▶ bloom target
//! combine (scene + bloom) ──▶ output view
//! ```
//!
//! Each rung of the ladder blurs the previous rung's output, so the
//! effective blur widens progressively and the composite's descending
//! weights shape the glow falloff.
//!
//! All offscreen targets share one format and live in a fixed-slot
//! [`TargetPool`]; resizing the pool invalidates pass bind groups, which
//! are rebuilt in one place.

pub mod context;
pub mod dynamic_buffer;
pub mod line_packer;
pub mod passes;
pub mod shader;
pub mod target_pool;

pub use context::WgpuContext;

use crate::errors::{GlowlineError, Result};
use crate::renderer::dynamic_buffer::DynamicVertexBuffer;
use crate::renderer::line_packer::{pack_scene, scene_scalar_count};
use crate::renderer::passes::{BlitPass, BlurPass, CombinePass, CompositePass, LinePass};
use crate::renderer::shader::{ShaderManager, UniformBlock};
use crate::renderer::target_pool::TargetPool;
use crate::scene::camera::Camera;
use crate::scene::scene::Scene;

/// Offscreen ladder format. Additive stacking overshoots 1.0 long before
/// the combine pass, so the ladder is float, not unorm.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Sharp line render.
const SLOT_SCENE: usize = 0;
/// Pristine copy of the scene target seeding the blur ladder.
const SLOT_SOURCE: usize = 1;
/// Blur scratch, horizontal result.
const SLOT_PING: usize = 2;
/// Blur scratch, vertical result.
const SLOT_PONG: usize = 3;
/// Blur level `i` lives at `SLOT_LEVEL_BASE + i`; the bloom target follows
/// the last level.
const SLOT_LEVEL_BASE: usize = 4;

/// Bloom pipeline configuration, validated at renderer construction.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Stroke width in the same pre-scale units as the original canvas
    /// renderer (multiplied by 0.001 before reaching the shader).
    pub line_width: f32,
    /// Ascending Gaussian radii, one blur ladder rung each.
    pub kernel_radii: Vec<u32>,
    /// Per-level composite weights, same length as `kernel_radii`.
    pub level_weights: Vec<f32>,
    /// Per-level tint colors, same length as `kernel_radii`.
    pub level_tints: Vec<[f32; 4]>,
    /// Scale applied to the bloom texture in the combine pass.
    pub bloom_strength: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            line_width: 4.0,
            kernel_radii: vec![3, 5, 7, 9, 11],
            level_weights: vec![1.0, 0.8, 0.6, 0.4, 0.2],
            level_tints: vec![[1.0, 1.0, 1.0, 1.0]; 5],
            bloom_strength: 1.0,
        }
    }
}

impl RenderSettings {
    fn validate(&self) -> Result<()> {
        if self.kernel_radii.is_empty() {
            return Err(GlowlineError::InvalidSettings(
                "kernel_radii must not be empty".to_string(),
            ));
        }
        if self.level_weights.len() != self.kernel_radii.len()
            || self.level_tints.len() != self.kernel_radii.len()
        {
            return Err(GlowlineError::InvalidSettings(format!(
                "kernel_radii ({}), level_weights ({}) and level_tints ({}) must have equal length",
                self.kernel_radii.len(),
                self.level_weights.len(),
                self.level_tints.len()
            )));
        }
        Ok(())
    }

    fn level_count(&self) -> usize {
        self.kernel_radii.len()
    }
}

/// The line-and-bloom renderer. Owns every GPU resource of the pipeline;
/// scene and camera stay caller-owned and are read per draw.
pub struct Renderer {
    settings: RenderSettings,
    frame_uniforms: UniformBlock,
    vertex_buffer: DynamicVertexBuffer,
    pool: TargetPool,

    line: LinePass,
    blit: BlitPass,
    blur: BlurPass,
    composite: CompositePass,
    combine: CombinePass,

    last_vertex_count: u32,
}

impl Renderer {
    /// Builds the full pipeline. Shader compilation happens here; a
    /// compile failure is fatal and aborts construction.
    pub fn new(
        ctx: &WgpuContext,
        output_format: wgpu::TextureFormat,
        settings: RenderSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let device = &ctx.device;
        let mut shaders = ShaderManager::new();

        let frame_uniforms = UniformBlock::new(
            device,
            "Frame Uniforms",
            &[
                ("viewport_size", 2),
                ("camera_origin", 2),
                ("camera_zoom", 1),
                ("camera_rotation", 1),
                ("line_width", 1),
                ("time", 1),
            ],
        );

        let line = LinePass::new(device, &mut shaders, &frame_uniforms, OFFSCREEN_FORMAT)?;
        let blit = BlitPass::new(device, &ctx.queue, &mut shaders, OFFSCREEN_FORMAT)?;
        let blur = BlurPass::new(device, &mut shaders, &settings.kernel_radii, OFFSCREEN_FORMAT)?;
        let mut composite =
            CompositePass::new(device, &mut shaders, settings.level_count(), OFFSCREEN_FORMAT)?;
        composite.set_levels(&ctx.queue, &settings.level_weights, &settings.level_tints);
        let mut combine = CombinePass::new(device, &mut shaders, output_format)?;
        combine.set_strength(&ctx.queue, settings.bloom_strength);

        log::info!(
            "renderer ready: {} blur levels, {} shader modules",
            settings.level_count(),
            shaders.module_count()
        );

        Ok(Self {
            settings,
            frame_uniforms,
            vertex_buffer: DynamicVertexBuffer::new("Line Vertices"),
            pool: TargetPool::new(device),
            line,
            blit,
            blur,
            composite,
            combine,
            last_vertex_count: 0,
        })
    }

    fn bloom_slot(&self) -> usize {
        SLOT_LEVEL_BASE + self.settings.level_count()
    }

    fn rebind(&mut self, ctx: &WgpuContext, width: u32, height: u32) {
        let device = &ctx.device;
        let levels = self.settings.level_count();

        self.blit
            .rebind(device, &self.pool, &[SLOT_SCENE, SLOT_PONG]);

        let blur_sources: Vec<usize> = (0..levels)
            .map(|i| {
                if i == 0 {
                    SLOT_SOURCE
                } else {
                    SLOT_LEVEL_BASE + i - 1
                }
            })
            .collect();
        self.blur.rebind(device, &self.pool, &blur_sources, SLOT_PING);
        self.blur.set_viewport(&ctx.queue, width, height);

        let level_slots: Vec<usize> = (0..levels).map(|i| SLOT_LEVEL_BASE + i).collect();
        self.composite.rebind(device, &self.pool, &level_slots);
        self.combine
            .rebind(device, &self.pool, SLOT_SCENE, self.bloom_slot());
    }

    /// Renders one frame into `output`.
    ///
    /// An empty scene still runs every pass over cleared targets, yielding
    /// a black frame with no special-casing.
    pub fn draw(
        &mut self,
        ctx: &WgpuContext,
        scene: &Scene,
        camera: &Camera,
        time: f32,
        output: &wgpu::TextureView,
    ) {
        let width = camera.viewport.x as u32;
        let height = camera.viewport.y as u32;
        let target_count = self.bloom_slot() + 1;
        if self
            .pool
            .ensure_size(&ctx.device, width, height, target_count)
        {
            self.rebind(ctx, width, height);
        }

        // Pack and upload the line geometry.
        self.vertex_buffer.reset();
        self.vertex_buffer.reserve_for(scene_scalar_count(scene));
        self.last_vertex_count = pack_scene(scene, &mut self.vertex_buffer);
        self.vertex_buffer.upload(&ctx.device, &ctx.queue);

        self.frame_uniforms
            .set("viewport_size", &[camera.viewport.x, camera.viewport.y]);
        self.frame_uniforms
            .set("camera_origin", &[camera.origin.x, camera.origin.y]);
        self.frame_uniforms.set("camera_zoom", &[camera.zoom]);
        self.frame_uniforms
            .set("camera_rotation", &[camera.rotation]);
        self.frame_uniforms
            .set("line_width", &[0.001 * self.settings.line_width]);
        self.frame_uniforms.set("time", &[time]);
        self.frame_uniforms.upload(&ctx.queue);

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.line.encode(
            &mut encoder,
            self.pool.view(SLOT_SCENE),
            self.vertex_buffer.gpu_buffer(),
            self.last_vertex_count,
        );
        self.blit
            .encode(&mut encoder, SLOT_SCENE, self.pool.view(SLOT_SOURCE));

        for i in 0..self.blur.rung_count() {
            self.blur.encode(
                &mut encoder,
                i,
                self.pool.view(SLOT_PING),
                self.pool.view(SLOT_PONG),
            );
            self.blit
                .encode(&mut encoder, SLOT_PONG, self.pool.view(SLOT_LEVEL_BASE + i));
        }

        self.composite
            .encode(&mut encoder, self.pool.view(self.bloom_slot()));
        self.combine.encode(&mut encoder, output);

        ctx.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Strip vertices drawn by the most recent [`Renderer::draw`].
    #[must_use]
    pub fn last_vertex_count(&self) -> u32 {
        self.last_vertex_count
    }

    /// The active settings.
    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }
}
