//! Viewport
//!
//! Translates raw pointer and wheel input into camera state, and keeps the
//! per-frame derived state (visible bounds, world cursor, grid backdrop)
//! fresh. The windowing layer forwards plain pixel coordinates and
//! normalized wheel distances; nothing here depends on a particular event
//! source.

use glam::Vec2;

use crate::renderer::RenderSettings;
use crate::scene::camera::Camera;
use crate::scene::scene::Scene;

/// Viewport configuration.
#[derive(Clone, Debug)]
pub struct ViewportOptions {
    /// Line width passed to the line shader (in pre-scaled units; the
    /// shader multiplies by 0.001).
    pub line_width: f32,
    /// Initial zoom factor.
    pub zoom: f32,
    /// Lower zoom clamp.
    pub zoom_min: f32,
    /// Upper zoom clamp.
    pub zoom_max: f32,
    /// Zoom change per normalized wheel step.
    pub zoom_wheel_factor: f32,
    /// Whether the grid backdrop sprite is generated.
    pub grid_enabled: bool,
    /// Grid cell size in world units.
    pub grid_size: f32,
    /// Grid line color (low alpha by default; the lines blend additively).
    pub grid_color: [f32; 4],
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            line_width: 4.0,
            zoom: 1.0,
            zoom_min: 0.1,
            zoom_max: 10.0,
            zoom_wheel_factor: 0.05,
            grid_enabled: true,
            grid_size: 250.0,
            grid_color: [1.0, 1.0, 1.0, 0.25],
        }
    }
}

impl ViewportOptions {
    /// Renderer settings for this viewport: the configured line width over
    /// the default bloom parameters.
    #[must_use]
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            line_width: self.line_width,
            ..RenderSettings::default()
        }
    }
}

/// Pannable, zoomable view over a scene.
pub struct Viewport {
    /// Static configuration.
    pub options: ViewportOptions,
    /// Camera state driven by this viewport's input translation.
    pub camera: Camera,

    cursor_raw: Vec2,
    cursor_world: Vec2,
    cursor_changed: bool,
}

impl Viewport {
    /// Creates a viewport for the given pixel size.
    #[must_use]
    pub fn new(options: ViewportOptions, width: f32, height: f32) -> Self {
        let mut camera = Camera::new(width, height, options.zoom_min, options.zoom_max);
        camera.set_zoom(options.zoom);
        Self {
            options,
            camera,
            cursor_raw: Vec2::ZERO,
            cursor_world: Vec2::ZERO,
            cursor_changed: false,
        }
    }

    /// Updates the viewport pixel size (window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    /// Applies a normalized wheel distance to the camera zoom.
    pub fn on_wheel(&mut self, distance: f32) {
        self.camera
            .apply_wheel(distance, self.options.zoom_wheel_factor);
    }

    /// Records a pointer position in screen pixels and recomputes the world
    /// cursor through the camera's inverse transform. Returns the world
    /// position.
    pub fn set_cursor(&mut self, x: f32, y: f32) -> Vec2 {
        self.cursor_raw = Vec2::new(x, y);
        let world = self.camera.screen_to_world(self.cursor_raw);

        self.cursor_changed = world != self.cursor_world;
        if self.cursor_changed {
            self.cursor_world = world;
        }
        self.cursor_world
    }

    /// World-space cursor position from the last [`Viewport::set_cursor`].
    #[must_use]
    pub fn cursor_world(&self) -> Vec2 {
        self.cursor_world
    }

    /// Whether the last `set_cursor` moved the world cursor. Zoom and pan
    /// also move it, which is why [`Viewport::update`] re-derives the
    /// cursor every tick.
    #[must_use]
    pub fn cursor_changed(&self) -> bool {
        self.cursor_changed
    }

    /// Per-tick refresh: re-derives the world cursor against the current
    /// camera and regenerates the grid backdrop sprite in `scene`.
    pub fn update(&mut self, scene: &mut Scene) {
        let raw = self.cursor_raw;
        self.set_cursor(raw.x, raw.y);
        scene.update_backdrop(
            &self.camera,
            self.options.grid_enabled,
            self.options.grid_size,
            self.options.grid_color,
        );
    }
}
