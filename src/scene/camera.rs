//! Camera
//!
//! Plain value type holding zoom, pan origin, rotation, and the viewport
//! pixel size. The visible world-space bounds are derived on demand.
//!
//! The screen↔world mapping is part of the public contract (hit-testing and
//! cursor tracking depend on it):
//!
//! ```text
//! world = (screen - viewport / 2) / zoom + origin
//! ```

use glam::Vec2;

/// Derived visible world-space bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

/// Camera / viewport state.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Zoom factor, always within `[zoom_min, zoom_max]`.
    pub zoom: f32,
    /// World-space origin (pan): the world point at the viewport center.
    pub origin: Vec2,
    /// View rotation in radians.
    pub rotation: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Lower zoom clamp.
    pub zoom_min: f32,
    /// Upper zoom clamp.
    pub zoom_max: f32,
}

impl Camera {
    /// Creates a camera at the world origin with zoom 1.
    #[must_use]
    pub fn new(width: f32, height: f32, zoom_min: f32, zoom_max: f32) -> Self {
        Self {
            zoom: 1.0,
            origin: Vec2::ZERO,
            rotation: 0.0,
            viewport: Vec2::new(width, height),
            zoom_min,
            zoom_max,
        }
    }

    /// Updates the viewport pixel size.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Sets the zoom factor, clamped to `[zoom_min, zoom_max]`.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
    }

    /// Applies a normalized wheel distance scaled by `wheel_factor`.
    /// The clamp holds no matter how large the delta is.
    pub fn apply_wheel(&mut self, distance: f32, wheel_factor: f32) {
        self.set_zoom(self.zoom + distance * wheel_factor);
    }

    /// Maps a screen-pixel position to world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.viewport / 2.0) / self.zoom + self.origin
    }

    /// Maps a world-space position to screen pixels. Exact inverse of
    /// [`Camera::screen_to_world`].
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.origin) * self.zoom + self.viewport / 2.0
    }

    /// Visible world-space bounds for the current zoom/origin/viewport.
    #[must_use]
    pub fn visible_bounds(&self) -> VisibleBounds {
        let width = self.viewport.x / self.zoom;
        let height = self.viewport.y / self.zoom;
        let left = self.origin.x - width / 2.0;
        let top = self.origin.y - height / 2.0;
        VisibleBounds {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800.0, 600.0, 0.1, 10.0)
    }
}
