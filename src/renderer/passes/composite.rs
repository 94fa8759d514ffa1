//! Composite pass
//!
//! Sums the blur ladder's level textures into the single bloom texture.
//! The shader is generated from a template for the exact level count, and
//! each level's weight and tint are premultiplied on the CPU into one vec4
//! per level, so the fragment shader is a plain weighted sum.

use crate::errors::Result;
use crate::renderer::passes::{begin_pass, post_bind_layout, post_pipeline, QUAD_VERTEX_COUNT};
use crate::renderer::shader::{ShaderManager, UniformBlock};
use crate::renderer::target_pool::TargetPool;

pub struct CompositePass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    uniforms: UniformBlock,
    level_count: usize,
    bind_group: Option<wgpu::BindGroup>,
    quad: wgpu::Buffer,
}

impl CompositePass {
    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderManager,
        level_count: usize,
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        let layout = post_bind_layout(device, "Composite Layout", level_count as u32);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Composite Pipeline Layout"),
            bind_group_layouts: &[Some(&layout)],
            immediate_size: 0,
        });
        let ctx = minijinja::context! { levels => level_count };
        let module = shaders.get_or_compile(device, "composite", ctx)?;
        let pipeline = post_pipeline(
            device,
            "Composite Pipeline",
            &pipeline_layout,
            &module,
            format,
            None,
        );

        let uniforms = UniformBlock::new(device, "Composite Uniforms", &[("levels", level_count * 4)]);

        Ok(Self {
            pipeline,
            layout,
            uniforms,
            level_count,
            bind_group: None,
            quad: super::create_quad_buffer(device),
        })
    }

    /// Writes the per-level `tint * weight` vec4s.
    pub fn set_levels(&mut self, queue: &wgpu::Queue, weights: &[f32], tints: &[[f32; 4]]) {
        let mut packed = Vec::with_capacity(self.level_count * 4);
        for (weight, tint) in weights.iter().zip(tints) {
            packed.extend(tint.iter().map(|c| c * weight));
        }
        self.uniforms.set("levels", &packed);
        self.uniforms.upload(queue);
    }

    /// Rebuilds the bind group over the pool's level views.
    pub fn rebind(&mut self, device: &wgpu::Device, pool: &TargetPool, level_slots: &[usize]) {
        debug_assert_eq!(level_slots.len(), self.level_count);

        let mut entries: Vec<wgpu::BindGroupEntry> = level_slots
            .iter()
            .enumerate()
            .map(|(i, &slot)| wgpu::BindGroupEntry {
                binding: i as u32,
                resource: wgpu::BindingResource::TextureView(pool.view(slot)),
            })
            .collect();
        entries.push(wgpu::BindGroupEntry {
            binding: self.level_count as u32,
            resource: wgpu::BindingResource::Sampler(pool.sampler()),
        });
        entries.push(wgpu::BindGroupEntry {
            binding: (self.level_count + 1) as u32,
            resource: self.uniforms.buffer().as_entire_binding(),
        });

        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Composite Bind Group"),
            layout: &self.layout,
            entries: &entries,
        }));
    }

    /// Sums all levels into `target`.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut pass = begin_pass(
            encoder,
            "Composite Pass",
            target,
            wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.bind_group.as_ref().expect("rebind before encode"), &[]);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
    }
}
