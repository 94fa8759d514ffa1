//! Sprites and Shapes
//!
//! A [`Shape`] is an ordered polyline: a sequence of 2D points drawn as
//! connected segments. Shapes are not implicitly closed; authors repeat the
//! first point at the end to close an outline.
//!
//! A [`Sprite`] is a transform-and-color-tagged collection of shapes. All
//! optional fields have documented defaults applied at construction, so a
//! partially specified sprite never fails downstream: a sprite built with
//! [`Sprite::default`] is invisible and has **scale 0** — a missing scale
//! deliberately renders nothing rather than guessing a visible size.

use glam::Vec2;

/// An ordered polyline: `points[i] → points[i+1]` are the drawn segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    /// Polyline points in sprite-local space.
    pub points: Vec<Vec2>,
}

impl Shape {
    /// Creates a shape from a list of points.
    #[must_use]
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Builds a shape from `[x, y]` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[[f32; 2]]) -> Self {
        Self {
            points: pairs.iter().map(|p| Vec2::new(p[0], p[1])).collect(),
        }
    }

    /// Number of segments this shape draws. A single-point shape still
    /// counts one (zero-length) segment so the renderer's square fallback
    /// applies instead of dropping the point.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 => 0,
            1 => 1,
            n => n - 1,
        }
    }

    /// Number of triangle-strip vertices the line packer emits for this
    /// shape: one lead-in, four per segment, one lead-out.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        let segments = self.segment_count();
        if segments == 0 { 0 } else { 4 * segments + 2 }
    }
}

/// A named scene entry: shapes plus transform, color, and animation deltas.
///
/// # Defaults
///
/// | field            | default            |
/// |------------------|--------------------|
/// | `visible`        | `false`            |
/// | `position`       | `[0, 0]`           |
/// | `rotation`       | `0` radians        |
/// | `scale`          | `0` (invisible)    |
/// | `color`          | opaque white       |
/// | `delta_*`        | `0` (no animation) |
///
/// The `delta_*` fields are per-second velocities evaluated **on the GPU**
/// against the frame time uniform, so a sprite can spin or drift without the
/// host re-packing different vertex data every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Invisible sprites contribute zero geometry and are skipped entirely.
    pub visible: bool,
    /// World-space offset.
    pub position: Vec2,
    /// Radians, applied about the sprite's own position.
    pub rotation: f32,
    /// Uniform scalar multiplier.
    pub scale: f32,
    /// RGBA, additively blended.
    pub color: [f32; 4],
    /// Position velocity (world units per time unit), applied in the shader.
    pub delta_position: Vec2,
    /// Scale velocity, applied in the shader.
    pub delta_scale: f32,
    /// Rotation velocity (radians per time unit), applied in the shader.
    pub delta_rotation: f32,
    /// Ordered shapes, drawn in sequence.
    pub shapes: Vec<Shape>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            visible: false,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 0.0,
            color: [1.0, 1.0, 1.0, 1.0],
            delta_position: Vec2::ZERO,
            delta_scale: 0.0,
            delta_rotation: 0.0,
            shapes: Vec::new(),
        }
    }
}

impl Sprite {
    /// Creates a visible sprite from shapes with identity-ish defaults
    /// (scale 1, opaque white).
    #[must_use]
    pub fn with_shapes(shapes: Vec<Shape>) -> Self {
        Self {
            visible: true,
            scale: 1.0,
            shapes,
            ..Self::default()
        }
    }

    /// Total triangle-strip vertices across all shapes.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.shapes.iter().map(Shape::vertex_count).sum()
    }
}
