//! Separable Gaussian blur pass
//!
//! One pipeline per configured radius, with the kernel weights baked into
//! the shader at compile time through the template engine — no weight
//! uniforms, no runtime loops over a maximum radius. Each rung of the bloom
//! ladder runs a horizontal pass into the ping target, then a vertical pass
//! into the pong target, using two small direction uniform blocks.

use crate::errors::Result;
use crate::renderer::passes::{begin_pass, post_bind_layout, post_pipeline, QUAD_VERTEX_COUNT};
use crate::renderer::shader::{ShaderManager, UniformBlock};
use crate::renderer::target_pool::TargetPool;

/// Normalized Gaussian half-kernel for `radius` taps each side of center.
fn gaussian_weights(radius: u32) -> Vec<f32> {
    let sigma = f64::from(radius).max(1.0) / 2.0;
    let weights: Vec<f64> = (0..=radius)
        .map(|i| (-f64::from(i * i) / (2.0 * sigma * sigma)).exp())
        .collect();
    let total: f64 = weights[0] + 2.0 * weights[1..].iter().sum::<f64>();
    weights.iter().map(|w| (w / total) as f32).collect()
}

pub struct BlurPass {
    radii: Vec<u32>,
    /// One pipeline per ladder rung, in `radii` order.
    pipelines: Vec<wgpu::RenderPipeline>,
    layout: wgpu::BindGroupLayout,
    horizontal_uniforms: UniformBlock,
    vertical_uniforms: UniformBlock,
    /// Per-rung horizontal bind group (reads that rung's source texture).
    horizontal_binds: Vec<wgpu::BindGroup>,
    /// Shared vertical bind group (always reads the ping target).
    vertical_bind: Option<wgpu::BindGroup>,
    quad: wgpu::Buffer,
}

impl BlurPass {
    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderManager,
        radii: &[u32],
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        let layout = post_bind_layout(device, "Blur Layout", 1);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blur Pipeline Layout"),
            bind_group_layouts: &[Some(&layout)],
            immediate_size: 0,
        });

        let pipelines = radii
            .iter()
            .map(|&radius| {
                let weights: Vec<String> = gaussian_weights(radius)
                    .iter()
                    .map(|w| format!("{w:?}"))
                    .collect();
                let ctx = minijinja::context! { radius => radius, weights => weights };
                let module = shaders.get_or_compile(device, "blur", ctx)?;
                Ok(post_pipeline(
                    device,
                    &format!("Blur Pipeline (r={radius})"),
                    &pipeline_layout,
                    &module,
                    format,
                    None,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let horizontal_uniforms = UniformBlock::new(
            device,
            "Blur Horizontal Uniforms",
            &[("direction", 2), ("viewport_size", 2)],
        );
        let vertical_uniforms = UniformBlock::new(
            device,
            "Blur Vertical Uniforms",
            &[("direction", 2), ("viewport_size", 2)],
        );

        Ok(Self {
            radii: radii.to_vec(),
            pipelines,
            layout,
            horizontal_uniforms,
            vertical_uniforms,
            horizontal_binds: Vec::new(),
            vertical_bind: None,
            quad: super::create_quad_buffer(device),
        })
    }

    /// Updates the texel-size uniforms for a new target size.
    pub fn set_viewport(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        let size = [width as f32, height as f32];
        self.horizontal_uniforms.set("direction", &[1.0, 0.0]);
        self.horizontal_uniforms.set("viewport_size", &size);
        self.vertical_uniforms.set("direction", &[0.0, 1.0]);
        self.vertical_uniforms.set("viewport_size", &size);
        self.horizontal_uniforms.upload(queue);
        self.vertical_uniforms.upload(queue);
    }

    /// Rebuilds bind groups: one horizontal group per rung reading
    /// `sources[i]`, one vertical group reading `ping_slot`.
    pub fn rebind(
        &mut self,
        device: &wgpu::Device,
        pool: &TargetPool,
        sources: &[usize],
        ping_slot: usize,
    ) {
        debug_assert_eq!(sources.len(), self.radii.len());

        let build = |slot: usize, uniforms: &UniformBlock, label: &str| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(pool.view(slot)),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(pool.sampler()),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: uniforms.buffer().as_entire_binding(),
                    },
                ],
            })
        };

        self.horizontal_binds = sources
            .iter()
            .enumerate()
            .map(|(i, &slot)| {
                build(
                    slot,
                    &self.horizontal_uniforms,
                    &format!("Blur H Bind Group (rung {i})"),
                )
            })
            .collect();
        self.vertical_bind = Some(build(ping_slot, &self.vertical_uniforms, "Blur V Bind Group"));
    }

    /// Runs rung `index`: horizontal into `ping`, vertical into `pong`.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        index: usize,
        ping: &wgpu::TextureView,
        pong: &wgpu::TextureView,
    ) {
        let pipeline = &self.pipelines[index];

        {
            let mut pass = begin_pass(
                encoder,
                "Blur Horizontal",
                ping,
                wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
            );
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &self.horizontal_binds[index], &[]);
            pass.set_vertex_buffer(0, self.quad.slice(..));
            pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }
        {
            let mut pass = begin_pass(
                encoder,
                "Blur Vertical",
                pong,
                wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
            );
            pass.set_pipeline(pipeline);
            pass.set_bind_group(
                0,
                self.vertical_bind.as_ref().expect("rebind before encode"),
                &[],
            );
            pass.set_vertex_buffer(0, self.quad.slice(..));
            pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }
    }

    /// Number of ladder rungs.
    #[must_use]
    pub fn rung_count(&self) -> usize {
        self.radii.len()
    }
}
