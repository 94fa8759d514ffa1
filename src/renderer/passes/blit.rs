//! Blit pass
//!
//! Straight texture-to-texture copy through a fullscreen quad, used to seed
//! the blur ladder from the scene target and to park each ladder rung's
//! result in its level texture. A sampled draw rather than a buffer copy so
//! source and destination formats never have to match exactly.

use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::renderer::passes::{begin_pass, post_bind_layout, post_pipeline, QUAD_VERTEX_COUNT};
use crate::renderer::shader::{ShaderManager, UniformBlock};
use crate::renderer::target_pool::TargetPool;

pub struct BlitPass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    uniforms: UniformBlock,
    /// Source slot → bind group, rebuilt when the pool reallocates.
    bind_groups: FxHashMap<usize, wgpu::BindGroup>,
    quad: wgpu::Buffer,
}

impl BlitPass {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        shaders: &mut ShaderManager,
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        let layout = post_bind_layout(device, "Blit Layout", 1);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[Some(&layout)],
            immediate_size: 0,
        });
        let module = shaders.get_or_compile(device, "blit", minijinja::Value::default())?;
        let pipeline = post_pipeline(device, "Blit Pipeline", &pipeline_layout, &module, format, None);

        let mut uniforms = UniformBlock::new(device, "Blit Uniforms", &[("opacity", 1)]);
        uniforms.set("opacity", &[1.0]);
        uniforms.upload(queue);

        Ok(Self {
            pipeline,
            layout,
            uniforms,
            bind_groups: FxHashMap::default(),
            quad: super::create_quad_buffer(device),
        })
    }

    /// Rebuilds bind groups for the given source slots against the pool's
    /// current views.
    pub fn rebind(&mut self, device: &wgpu::Device, pool: &TargetPool, source_slots: &[usize]) {
        self.bind_groups.clear();
        for &slot in source_slots {
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("Blit Bind Group (slot {slot})")),
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
                        resource: self.uniforms.buffer().as_entire_binding(),
                    },
                ],
            });
            self.bind_groups.insert(slot, bind_group);
        }
    }

    /// Copies `source_slot` into `target`.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        source_slot: usize,
        target: &wgpu::TextureView,
    ) {
        let bind_group = &self.bind_groups[&source_slot];
        let mut pass = begin_pass(
            encoder,
            "Blit Pass",
            target,
            wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
    }
}
