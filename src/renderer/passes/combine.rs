//! Combine pass
//!
//! Final stage: adds the bloom texture, scaled by the bloom strength, onto
//! the unblurred scene and writes the result to the caller's output view —
//! typically the swapchain, whose format can differ from the offscreen
//! ladder's.

use crate::errors::Result;
use crate::renderer::passes::{begin_pass, post_bind_layout, post_pipeline, QUAD_VERTEX_COUNT};
use crate::renderer::shader::{ShaderManager, UniformBlock};
use crate::renderer::target_pool::TargetPool;

pub struct CombinePass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    uniforms: UniformBlock,
    bind_group: Option<wgpu::BindGroup>,
    quad: wgpu::Buffer,
}

impl CombinePass {
    /// `output_format` is the format of the view [`CombinePass::encode`]
    /// will draw into, not the offscreen ladder format.
    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderManager,
        output_format: wgpu::TextureFormat,
    ) -> Result<Self> {
        let layout = post_bind_layout(device, "Combine Layout", 2);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Combine Pipeline Layout"),
            bind_group_layouts: &[Some(&layout)],
            immediate_size: 0,
        });
        let module = shaders.get_or_compile(device, "combine", minijinja::Value::default())?;
        let pipeline = post_pipeline(
            device,
            "Combine Pipeline",
            &pipeline_layout,
            &module,
            output_format,
            None,
        );

        let uniforms = UniformBlock::new(device, "Combine Uniforms", &[("bloom_strength", 1)]);

        Ok(Self {
            pipeline,
            layout,
            uniforms,
            bind_group: None,
            quad: super::create_quad_buffer(device),
        })
    }

    pub fn set_strength(&mut self, queue: &wgpu::Queue, strength: f32) {
        self.uniforms.set("bloom_strength", &[strength]);
        self.uniforms.upload(queue);
    }

    /// Rebuilds the bind group over the scene and bloom views.
    pub fn rebind(
        &mut self,
        device: &wgpu::Device,
        pool: &TargetPool,
        scene_slot: usize,
        bloom_slot: usize,
    ) {
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Combine Bind Group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(pool.view(scene_slot)),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(pool.view(bloom_slot)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(pool.sampler()),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: self.uniforms.buffer().as_entire_binding(),
                },
            ],
        }));
    }

    /// Writes `scene + bloom * strength` into `output`.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, output: &wgpu::TextureView) {
        let mut pass = begin_pass(
            encoder,
            "Combine Pass",
            output,
            wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.bind_group.as_ref().expect("rebind before encode"), &[]);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
    }
}
