//! Line pass
//!
//! Draws the packed triangle-strip vertex stream into the scene target.
//! The quad expansion, sprite animation, and camera transform all happen in
//! the vertex shader; the fragment shader does distance-based edge
//! anti-aliasing. Blending is additive (ONE, ONE) with no depth test, so
//! overlapping strokes brighten — the look the bloom ladder feeds on.

use crate::errors::Result;
use crate::renderer::line_packer::line_vertex_schema;
use crate::renderer::passes::begin_pass;
use crate::renderer::shader::{ShaderManager, UniformBlock};

pub struct LinePass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

impl LinePass {
    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderManager,
        frame_uniforms: &UniformBlock,
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        let bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Line Pass Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Line Pass Bind Group"),
            layout: &bind_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniforms.buffer().as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pass Pipeline Layout"),
            bind_group_layouts: &[Some(&bind_layout)],
            immediate_size: 0,
        });

        let module = shaders.get_or_compile(device, "line", minijinja::Value::default())?;

        let schema = line_vertex_schema()?;
        let attributes = schema.wgpu_attributes();

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[schema.layout(&attributes)],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            bind_group,
        })
    }

    /// Clears `target` and draws `vertex_count` strip vertices. With an
    /// empty scene this still runs, leaving a cleanly cleared target for
    /// the post chain.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        vertices: Option<&wgpu::Buffer>,
        vertex_count: u32,
    ) {
        let mut pass = begin_pass(
            encoder,
            "Line Pass",
            target,
            wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
        );
        if let Some(buffer) = vertices
            && vertex_count > 0
        {
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..vertex_count, 0..1);
        }
    }
}
