//! GPU Program Abstraction
//!
//! Three pieces replace WebGL-style runtime reflection with an explicit
//! load-time schema, while preserving the "introspect once, bind fast"
//! contract:
//!
//! - [`ShaderManager`]: shader source provider + compiled-module cache.
//!   Sources are WGSL minijinja templates embedded in the crate, keyed by
//!   logical name ("line", "blur", ...). Compilation runs inside a wgpu
//!   validation error scope; a failure is **fatal** and surfaces the driver
//!   diagnostic verbatim.
//! - [`VertexSchema`]: ordered attribute descriptor list. Computes the
//!   per-vertex stride, name → shader location map, and the
//!   `wgpu::VertexBufferLayout`. Component counts outside 1..=4 raise an
//!   explicit [`GlowlineError::UnsupportedAttribute`].
//! - [`UniformBlock`]: ordered scalar-slot schema over a single uniform
//!   buffer, with by-name setters. Setting an unknown name is a reported
//!   but **non-fatal** error (the value is dropped and the draw continues),
//!   because one frame-level uniform set is shared across passes whose
//!   shaders declare different subsets of it.

use minijinja::{Environment, syntax::SyntaxConfig};
use rust_embed::RustEmbed;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::sync::OnceLock;
use xxhash_rust::xxh3::xxh3_128;

use crate::errors::{GlowlineError, Result};

// ─── Shader source provider ──────────────────────────────────────────────────

#[derive(RustEmbed)]
#[folder = "src/renderer/shaders"]
struct ShaderAssets;

static SHADER_ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn get_env() -> &'static Environment<'static> {
    SHADER_ENV.get_or_init(|| {
        let mut env = Environment::new();

        // WGSL uses braces heavily; block statements get distinct delimiters.
        let syntax = SyntaxConfig::builder()
            .block_delimiters("{$", "$}")
            .variable_delimiters("{{", "}}")
            .line_statement_prefix("$$")
            .build()
            .expect("Failed to configure Jinja2 syntax");

        env.set_syntax(syntax);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_loader(shader_loader);
        env
    })
}

fn shader_loader(name: &str) -> std::result::Result<Option<String>, minijinja::Error> {
    let filename = if std::path::Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wgsl"))
    {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}.wgsl"))
    };

    if let Some(file) = ShaderAssets::get(&filename)
        && let Ok(source) = std::str::from_utf8(file.data.as_ref())
    {
        return Ok(Some(source.to_string()));
    }

    Ok(None)
}

/// Shader source provider and compiled-module cache.
///
/// Deduplicates compiled `wgpu::ShaderModule`s by hashing the **rendered**
/// WGSL source with xxh3-128, so the five blur-radius variants of one
/// template each compile exactly once.
pub struct ShaderManager {
    /// xxh3-128 of final WGSL → compiled module.
    module_cache: FxHashMap<u128, wgpu::ShaderModule>,
}

impl Default for ShaderManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            module_cache: FxHashMap::default(),
        }
    }

    /// Renders the named template with `ctx` and compiles it (or returns the
    /// cached module).
    ///
    /// Compilation is wrapped in a validation error scope: any driver
    /// diagnostic aborts with [`GlowlineError::ShaderCompileFailed`] carrying
    /// the log verbatim. There is no fallback — the pipeline cannot run with
    /// a missing pass shader.
    pub fn get_or_compile(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        ctx: minijinja::Value,
    ) -> Result<wgpu::ShaderModule> {
        let template =
            get_env()
                .get_template(name)
                .map_err(|e| GlowlineError::ShaderTemplateFailed {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        let source = template
            .render(ctx)
            .map_err(|e| GlowlineError::ShaderTemplateFailed {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        let hash = xxh3_128(source.as_bytes());
        if let Some(module) = self.module_cache.get(&hash) {
            return Ok(module.clone());
        }

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("Shader Module {name}")),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(GlowlineError::ShaderCompileFailed {
                name: name.to_string(),
                log: err.to_string(),
            });
        }

        self.module_cache.insert(hash, module.clone());
        Ok(module)
    }

    /// Returns the number of cached shader modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.module_cache.len()
    }
}

// ─── Vertex schema ────────────────────────────────────────────────────────────

/// One vertex attribute: a name and a float component count (1..=4).
#[derive(Clone, Copy, Debug)]
pub struct AttributeDesc {
    pub name: &'static str,
    pub components: u32,
}

/// Ordered attribute list for one vertex stream.
///
/// Attribute shader locations follow list order; the stride is the sum of
/// component counts. Everything is fixed at load time — no per-frame name
/// lookups.
#[derive(Clone, Debug)]
pub struct VertexSchema {
    attributes: Vec<AttributeDesc>,
    stride: u32,
}

impl VertexSchema {
    /// Builds a schema, validating every component count.
    pub fn new(attributes: &[AttributeDesc]) -> Result<Self> {
        let mut stride = 0;
        for attr in attributes {
            if !(1..=4).contains(&attr.components) {
                return Err(GlowlineError::UnsupportedAttribute {
                    name: attr.name.to_string(),
                    components: attr.components,
                });
            }
            stride += attr.components;
        }
        Ok(Self {
            attributes: attributes.to_vec(),
            stride,
        })
    }

    /// Per-vertex stride in `f32` scalars.
    #[must_use]
    pub fn stride_scalars(&self) -> u32 {
        self.stride
    }

    /// Per-vertex stride in bytes.
    #[must_use]
    pub fn stride_bytes(&self) -> u64 {
        u64::from(self.stride) * 4
    }

    /// Shader location for a named attribute, if it exists in the schema.
    #[must_use]
    pub fn location(&self, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .position(|a| a.name == name)
            .map(|i| i as u32)
    }

    /// The `wgpu` attribute list (sequential locations, packed offsets).
    #[must_use]
    pub fn wgpu_attributes(&self) -> Vec<wgpu::VertexAttribute> {
        let mut offset = 0u64;
        self.attributes
            .iter()
            .enumerate()
            .map(|(location, attr)| {
                let format = match attr.components {
                    1 => wgpu::VertexFormat::Float32,
                    2 => wgpu::VertexFormat::Float32x2,
                    3 => wgpu::VertexFormat::Float32x3,
                    _ => wgpu::VertexFormat::Float32x4,
                };
                let out = wgpu::VertexAttribute {
                    format,
                    offset,
                    shader_location: location as u32,
                };
                offset += u64::from(attr.components) * 4;
                out
            })
            .collect()
    }

    /// The buffer layout over a previously built attribute list.
    #[must_use]
    pub fn layout<'a>(
        &self,
        attributes: &'a [wgpu::VertexAttribute],
    ) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride_bytes(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

// ─── Uniform block ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct UniformField {
    name: &'static str,
    offset: usize,
    len: usize,
}

/// A named-field view over one uniform buffer.
///
/// Fields are laid out sequentially in declaration order as `f32` scalars;
/// the WGSL struct on the other side must match. The backing store is
/// padded to a 16-byte multiple.
pub struct UniformBlock {
    label: &'static str,
    fields: Vec<UniformField>,
    data: Vec<f32>,
    buffer: wgpu::Buffer,
}

impl UniformBlock {
    /// Creates the block and its GPU buffer. `fields` are (name, scalar
    /// count) pairs in WGSL declaration order.
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &'static str, fields: &[(&'static str, usize)]) -> Self {
        let mut offset = 0;
        let fields: Vec<UniformField> = fields
            .iter()
            .map(|&(name, len)| {
                let field = UniformField { name, offset, len };
                offset += len;
                field
            })
            .collect();

        // Pad to vec4 granularity for uniform binding alignment.
        let padded = offset.div_ceil(4) * 4;
        let data = vec![0.0f32; padded.max(4)];

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (data.len() * 4) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            label,
            fields,
            data,
            buffer,
        }
    }

    /// Sets a named field. Unknown names and length mismatches are reported
    /// and dropped — the draw continues, because uniform sets are shared
    /// across passes with different active uniforms.
    pub fn set(&mut self, name: &str, values: &[f32]) {
        let Some(field) = self.fields.iter().find(|f| f.name == name) else {
            log::warn!("{}: unknown uniform '{name}' dropped", self.label);
            return;
        };
        if field.len != values.len() {
            log::warn!(
                "{}: uniform '{name}' expects {} scalars, got {} — dropped",
                self.label,
                field.len,
                values.len()
            );
            return;
        }
        self.data[field.offset..field.offset + field.len].copy_from_slice(values);
    }

    /// Whether a field exists, for callers that want to skip the report.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Current CPU-side value of a named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &self.data[f.offset..f.offset + f.len])
    }

    /// Uploads the CPU-side data to the GPU buffer.
    pub fn upload(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&self.data));
    }

    /// The backing GPU buffer, for bind group construction.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
