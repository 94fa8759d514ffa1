//! Scene
//!
//! A scene is a flat name → [`Sprite`] map. Insertion order is irrelevant:
//! the renderer always walks sprites in **lexicographic name order**, so
//! packing the same scene twice yields byte-identical vertex data no matter
//! how it was built.
//!
//! One name is reserved: [`BACKDROP_NAME`] holds the optional grid backdrop
//! sprite, regenerated every frame from the camera's visible bounds.

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::scene::camera::Camera;
use crate::scene::sprite::{Shape, Sprite};

/// Reserved sprite name for the grid backdrop.
pub const BACKDROP_NAME: &str = "_backdrop";

/// A mapping from sprite name to sprite.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    sprites: FxHashMap<String, Sprite>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a sprite under `name`.
    pub fn insert(&mut self, name: impl Into<String>, sprite: Sprite) {
        self.sprites.insert(name.into(), sprite);
    }

    /// Removes a sprite, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Sprite> {
        self.sprites.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Sprite> {
        self.sprites.get_mut(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite names in lexicographic order — the packing iteration order.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sprites.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Visible sprites in packing order.
    pub fn visible_in_order(&self) -> impl Iterator<Item = (&str, &Sprite)> {
        self.sorted_names()
            .into_iter()
            .filter_map(|name| {
                let sprite = &self.sprites[name];
                sprite.visible.then_some((name, sprite))
            })
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Total triangle-strip vertices the current scene packs to. Invisible
    /// sprites are excluded here too, so buffer sizing never overshoots for
    /// hidden content.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.sprites
            .values()
            .filter(|s| s.visible)
            .map(Sprite::vertex_count)
            .sum()
    }

    /// Regenerates the grid backdrop sprite from the camera's visible
    /// bounds, or removes it when the grid is disabled.
    ///
    /// Grid lines are phase-locked to world space: the first vertical line
    /// sits at `visible_left % grid_size` inside the viewport, so panning
    /// scrolls the grid rather than pinning it to the screen.
    pub fn update_backdrop(
        &mut self,
        camera: &Camera,
        enabled: bool,
        grid_size: f32,
        color: [f32; 4],
    ) {
        if !enabled || grid_size <= 0.0 {
            self.sprites.remove(BACKDROP_NAME);
            return;
        }

        let bounds = camera.visible_bounds();
        let backdrop = self
            .sprites
            .entry(BACKDROP_NAME.to_string())
            .or_insert_with(|| Sprite {
                visible: true,
                scale: 1.0,
                // Cancelled by the vertex shader's quarter-turn offset.
                rotation: std::f32::consts::FRAC_PI_2,
                ..Sprite::default()
            });

        backdrop.position = Vec2::new(bounds.left, bounds.top);
        backdrop.color = color;
        backdrop.shapes.clear();

        let offset_x = bounds.left % grid_size;
        let offset_y = bounds.top % grid_size;

        let mut x = -offset_x;
        while x < bounds.width {
            backdrop.shapes.push(Shape::new(vec![
                Vec2::new(x, 0.0),
                Vec2::new(x, bounds.height + grid_size),
            ]));
            x += grid_size;
        }
        let mut y = -offset_y;
        while y < bounds.height {
            backdrop.shapes.push(Shape::new(vec![
                Vec2::new(0.0, y),
                Vec2::new(bounds.width + grid_size, y),
            ]));
            y += grid_size;
        }
    }
}
