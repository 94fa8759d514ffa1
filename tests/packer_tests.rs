//! Line Packer Integration Tests
//!
//! Tests for:
//! - Vertex count formula: 4*(N-1)+2 for N-point shapes
//! - Invisible sprites contributing zero geometry
//! - Deterministic packing regardless of insertion order
//! - Degenerate (zero-length / single-point) segment handling
//! - Staging buffer growth policy

use glam::Vec2;
use glowline::renderer::dynamic_buffer::DynamicVertexBuffer;
use glowline::renderer::line_packer::{
    line_vertex_schema, pack_scene, scene_scalar_count, VERTEX_SCALARS,
};
use glowline::{Scene, Shape, Sprite};

fn shape_with_points(n: usize) -> Shape {
    Shape::new((0..n).map(|i| Vec2::new(i as f32, i as f32 * 2.0)).collect())
}

fn pack(scene: &Scene) -> (Vec<f32>, u32) {
    let mut buf = DynamicVertexBuffer::with_capacity("test", 0);
    buf.reserve_for(scene_scalar_count(scene));
    let count = pack_scene(scene, &mut buf);
    (buf.staged().to_vec(), count)
}

// ============================================================================
// Vertex Count Formula
// ============================================================================

#[test]
fn n_point_shape_packs_4n_minus_2_vertices() {
    for n in 2..=10 {
        let mut scene = Scene::new();
        scene.insert("s", Sprite::with_shapes(vec![shape_with_points(n)]));
        let (data, count) = pack(&scene);
        let expected = 4 * (n - 1) + 2;
        assert_eq!(count as usize, expected, "vertex count for {n} points");
        assert_eq!(data.len(), expected * VERTEX_SCALARS);
    }
}

#[test]
fn empty_shape_packs_nothing() {
    let mut scene = Scene::new();
    scene.insert("s", Sprite::with_shapes(vec![Shape::new(vec![])]));
    let (data, count) = pack(&scene);
    assert_eq!(count, 0);
    assert!(data.is_empty());
}

#[test]
fn single_point_shape_packs_one_degenerate_segment() {
    let mut scene = Scene::new();
    scene.insert(
        "s",
        Sprite::with_shapes(vec![Shape::new(vec![Vec2::new(3.0, 4.0)])]),
    );
    let (data, count) = pack(&scene);
    // Lead-in + 4 + lead-out.
    assert_eq!(count, 6);
    // The synthesized segment is (p, p); both endpoints are the point, and
    // nothing is NaN. The shader's fallback direction draws it as a square.
    for vertex in data.chunks_exact(VERTEX_SCALARS) {
        assert_eq!(&vertex[1..5], &[3.0, 4.0, 3.0, 4.0]);
        assert!(vertex.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn multi_shape_sprite_sums_per_shape_counts() {
    let mut scene = Scene::new();
    scene.insert(
        "s",
        Sprite::with_shapes(vec![shape_with_points(3), shape_with_points(5)]),
    );
    let (_, count) = pack(&scene);
    assert_eq!(count, (4 * 2 + 2) + (4 * 4 + 2));
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn invisible_sprites_pack_zero_vertices() {
    let mut scene = Scene::new();
    let mut sprite = Sprite::with_shapes(vec![shape_with_points(8)]);
    sprite.visible = false;
    scene.insert("hidden", sprite);
    let (data, count) = pack(&scene);
    assert_eq!(count, 0);
    assert!(data.is_empty());
    assert_eq!(scene_scalar_count(&scene), 0);
}

#[test]
fn default_sprite_is_invisible() {
    let mut scene = Scene::new();
    scene.insert(
        "default",
        Sprite {
            shapes: vec![shape_with_points(4)],
            ..Sprite::default()
        },
    );
    let (_, count) = pack(&scene);
    assert_eq!(count, 0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn packing_is_deterministic_across_insertion_orders() {
    let names = ["delta", "alpha", "charlie", "bravo"];
    let sprite_for = |i: usize| {
        let mut sprite = Sprite::with_shapes(vec![shape_with_points(i + 2)]);
        sprite.position = Vec2::new(i as f32, -(i as f32));
        sprite
    };

    let mut forward = Scene::new();
    for (i, name) in names.iter().enumerate() {
        forward.insert(*name, sprite_for(i));
    }
    let mut reverse = Scene::new();
    for (i, name) in names.iter().enumerate().rev() {
        reverse.insert(*name, sprite_for(i));
    }

    let (a, count_a) = pack(&forward);
    let (b, count_b) = pack(&reverse);
    assert_eq!(count_a, count_b);
    assert_eq!(a, b, "same scene must pack byte-identically");
}

#[test]
fn sprites_pack_in_name_order() {
    let mut scene = Scene::new();
    let mut first = Sprite::with_shapes(vec![shape_with_points(2)]);
    first.color = [0.25, 0.0, 0.0, 1.0];
    let mut second = Sprite::with_shapes(vec![shape_with_points(2)]);
    second.color = [0.75, 0.0, 0.0, 1.0];
    scene.insert("zz", second);
    scene.insert("aa", first);

    let (data, _) = pack(&scene);
    // Color red channel is scalar 13 of each 17-scalar vertex.
    assert_eq!(data[13], 0.25, "'aa' must pack before 'zz'");
    let last_vertex = &data[data.len() - VERTEX_SCALARS..];
    assert_eq!(last_vertex[13], 0.75);
}

// ============================================================================
// Selector Sequence
// ============================================================================

#[test]
fn two_point_shape_emits_lead_in_quad_lead_out() {
    let mut scene = Scene::new();
    scene.insert("s", Sprite::with_shapes(vec![shape_with_points(2)]));
    let (data, count) = pack(&scene);
    assert_eq!(count, 6);

    let selectors: Vec<f32> = data
        .chunks_exact(VERTEX_SCALARS)
        .map(|v| v[0])
        .collect();
    assert_eq!(selectors, vec![0.0, 0.0, 1.0, 2.0, 3.0, 3.0]);
}

// ============================================================================
// Vertex Schema
// ============================================================================

#[test]
fn line_schema_stride_matches_packed_vertex_size() {
    let schema = line_vertex_schema().expect("line schema is valid");
    assert_eq!(schema.stride_scalars() as usize, VERTEX_SCALARS);
    assert_eq!(schema.stride_bytes() as usize, VERTEX_SCALARS * 4);
    // Selector leads the stream, color trails it.
    assert_eq!(schema.location("selector"), Some(0));
    assert_eq!(schema.location("color"), Some(4));
}

// ============================================================================
// Sizing & Growth
// ============================================================================

#[test]
fn scalar_count_matches_packed_length() {
    let mut scene = Scene::new();
    scene.insert("a", Sprite::with_shapes(vec![shape_with_points(7)]));
    scene.insert(
        "b",
        Sprite::with_shapes(vec![shape_with_points(2), shape_with_points(3)]),
    );
    let required = scene_scalar_count(&scene);
    let (data, _) = pack(&scene);
    assert_eq!(data.len(), required);
}

#[test]
fn buffer_growth_is_geometric_and_monotonic() {
    let mut buf = DynamicVertexBuffer::with_capacity("test", 100);
    assert_eq!(buf.capacity(), 100);

    buf.reserve_for(1000);
    // max(1000 * 1.5, 100 * 2)
    assert_eq!(buf.capacity(), 1500);

    // Shrinking requests never shrink the buffer.
    buf.reserve_for(10);
    assert_eq!(buf.capacity(), 1500);

    // Small overflow doubles instead of creeping.
    buf.reserve_for(1501);
    assert_eq!(buf.capacity(), 3000);
}

#[test]
fn reset_rewinds_cursor_but_keeps_capacity() {
    let mut buf = DynamicVertexBuffer::with_capacity("test", 8);
    buf.push(&[1.0, 2.0, 3.0]);
    assert_eq!(buf.len(), 3);
    buf.reset();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 8);
}
