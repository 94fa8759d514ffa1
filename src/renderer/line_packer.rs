//! Line packer
//!
//! Turns a [`Scene`] into the flat triangle-strip vertex stream the line
//! shader consumes. Each segment becomes four vertices carrying a corner
//! selector plus both endpoints; the vertex shader expands them into a
//! screen-aligned quad with half-width overhang at both ends for the
//! anti-aliased cap.
//!
//! Shapes within one strip are stitched with degenerate triangles: every
//! shape is bracketed by a lead-in vertex (duplicating its first corner)
//! and a lead-out vertex (duplicating its last), collapsing the bridge
//! between consecutive shapes to zero area.
//!
//! Packing walks sprites in lexicographic name order, so the output is
//! deterministic for a given scene regardless of insertion order.

use crate::renderer::dynamic_buffer::DynamicVertexBuffer;
use crate::renderer::shader::{AttributeDesc, VertexSchema};
use crate::scene::scene::Scene;
use crate::scene::sprite::{Shape, Sprite};

/// Scalars per packed vertex: selector(1) + segment(4) + transform(4) +
/// delta transform(4) + color(4).
pub const VERTEX_SCALARS: usize = 17;

/// Corner selectors, two per segment end. The shader decodes
/// `selector >= 2` as the far end and `selector % 2` as the strip side.
const SELECTORS: [f32; 4] = [0.0, 1.0, 2.0, 3.0];

/// The line vertex stream schema, in shader-location order.
pub fn line_vertex_schema() -> crate::errors::Result<VertexSchema> {
    VertexSchema::new(&[
        AttributeDesc { name: "selector", components: 1 },
        AttributeDesc { name: "segment", components: 4 },
        AttributeDesc { name: "transform", components: 4 },
        AttributeDesc { name: "delta_transform", components: 4 },
        AttributeDesc { name: "color", components: 4 },
    ])
}

/// Strip vertices one shape contributes (lead-in + 4 per segment +
/// lead-out).
#[must_use]
pub fn shape_vertex_count(shape: &Shape) -> usize {
    shape.vertex_count()
}

/// Exact scalar count [`pack_scene`] will write for `scene`. Computed
/// before packing so the staging buffer grows once, outside the hot loop.
#[must_use]
pub fn scene_scalar_count(scene: &Scene) -> usize {
    scene.vertex_count() * VERTEX_SCALARS
}

/// Packs every visible sprite into `out` and returns the vertex count.
///
/// `out` must already have capacity for [`scene_scalar_count`] scalars.
pub fn pack_scene(scene: &Scene, out: &mut DynamicVertexBuffer) -> u32 {
    let mut vertices = 0u32;
    for (_, sprite) in scene.visible_in_order() {
        vertices += pack_sprite(sprite, out);
    }
    vertices
}

fn pack_sprite(sprite: &Sprite, out: &mut DynamicVertexBuffer) -> u32 {
    let transform = [
        sprite.position.x,
        sprite.position.y,
        sprite.scale,
        sprite.rotation,
    ];
    let delta = [
        sprite.delta_position.x,
        sprite.delta_position.y,
        sprite.delta_scale,
        sprite.delta_rotation,
    ];

    let mut vertices = 0u32;
    for shape in &sprite.shapes {
        vertices += pack_shape(shape, &transform, &delta, &sprite.color, out);
    }
    vertices
}

fn pack_shape(
    shape: &Shape,
    transform: &[f32; 4],
    delta: &[f32; 4],
    color: &[f32; 4],
    out: &mut DynamicVertexBuffer,
) -> u32 {
    if shape.points.is_empty() {
        return 0;
    }

    let mut emit = |selector: f32, segment: [f32; 4]| {
        out.push(&[selector]);
        out.push(&segment);
        out.push(transform);
        out.push(delta);
        out.push(color);
    };

    // A lone point packs as a zero-length segment; the shader's degenerate
    // fallback renders it as an axis-aligned square cap.
    let segment_at = |i: usize| -> [f32; 4] {
        if shape.points.len() == 1 {
            let p = shape.points[0];
            [p.x, p.y, p.x, p.y]
        } else {
            let a = shape.points[i];
            let b = shape.points[i + 1];
            [a.x, a.y, b.x, b.y]
        }
    };
    let segments = shape.segment_count();

    // Lead-in: duplicate the first corner of the first segment.
    emit(SELECTORS[0], segment_at(0));
    for i in 0..segments {
        let segment = segment_at(i);
        for selector in SELECTORS {
            emit(selector, segment);
        }
    }
    // Lead-out: duplicate the last corner of the last segment.
    emit(SELECTORS[3], segment_at(segments - 1));

    (4 * segments + 2) as u32
}
