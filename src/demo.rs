//! Demo shape library
//!
//! Unit-scale polyline art used by the demo binary and handy in tests: a
//! crosshair-in-circle default marker, a "hero" ship outline, a bus, and a
//! triple-ring repulsor. All shapes fit in roughly `[-0.5, 0.5]` (the
//! repulsor rings extend to 3) and are meant to be scaled up via
//! `Sprite::scale`.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::scene::sprite::Shape;

/// Crosshair inside an octagonal "circle": the placeholder marker.
#[must_use]
pub fn default_shape() -> Shape {
    let mut points = vec![
        Vec2::new(-0.5, 0.0),
        Vec2::new(0.5, 0.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, -0.5),
        Vec2::new(0.0, 0.5),
        Vec2::new(0.0, 0.0),
    ];
    for idx in 0..8 {
        let rot = idx as f32 * (TAU / 8.0);
        points.push(Vec2::new(0.5 * rot.cos(), 0.5 * rot.sin()));
    }
    points.push(Vec2::new(0.5, 0.0));
    Shape::new(points)
}

/// The hero ship outline.
#[must_use]
pub fn hero_shapes() -> Vec<Shape> {
    vec![Shape::from_pairs(&[
        [0.0, 0.5],
        [0.125, 0.4167],
        [0.25, 0.0],
        [0.375, -0.1667],
        [0.25, -0.5],
        [0.125, -0.5],
        [0.0625, -0.25],
        [-0.0625, -0.25],
        [-0.125, -0.5],
        [-0.25, -0.5],
        [-0.375, -0.1667],
        [-0.25, 0.0],
        [-0.125, 0.4167],
        [0.0, 0.5],
    ])]
}

/// A boxy bus outline.
#[must_use]
pub fn bus_shapes() -> Vec<Shape> {
    vec![Shape::from_pairs(&[
        [0.125, 0.5],
        [-0.125, 0.5],
        [-0.25, 0.375],
        [-0.25, 0.125],
        [-0.3125, 0.25],
        [-0.4375, 0.25],
        [-0.5, 0.125],
        [-0.5, -0.4375],
        [-0.4375, -0.5],
        [-0.375, -0.5],
        [-0.25, -0.4375],
        [-0.25, -0.125],
        [-0.125, -0.5],
        [0.125, -0.5],
        [0.25, -0.125],
        [0.25, -0.4375],
        [0.375, -0.5],
        [0.4375, -0.5],
        [0.5, -0.4375],
        [0.5, 0.125],
        [0.4375, 0.25],
        [0.3125, 0.25],
        [0.25, 0.125],
        [0.25, 0.375],
        [0.125, 0.5],
    ])]
}

/// Three concentric octagon rings plus a zigzag core.
#[must_use]
pub fn repulsor_shapes() -> Vec<Shape> {
    const SIDES: usize = 8;
    let mut ring = Vec::with_capacity(SIDES + 1);
    for idx in 0..SIDES {
        let rot = idx as f32 * (TAU / SIDES as f32);
        ring.push(Vec2::new(rot.cos(), rot.sin()));
    }
    ring.push(ring[0]);

    let scaled = |factor: f32| Shape::new(ring.iter().map(|p| *p * factor).collect());

    vec![
        scaled(1.0),
        scaled(2.0),
        scaled(3.0),
        Shape::from_pairs(&[
            [-0.5, 0.0],
            [-0.375, -0.5],
            [-0.25, -0.5],
            [-0.0625, 0.25],
            [0.0625, 0.25],
            [0.25, -0.5],
            [0.375, -0.5],
            [0.5, 0.0],
            [0.375, 0.5],
            [0.25, 0.5],
            [0.0625, -0.25],
            [-0.0625, -0.25],
            [-0.25, 0.5],
            [-0.375, 0.5],
            [-0.5, 0.0],
        ]),
    ]
}
