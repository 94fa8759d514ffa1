//! Camera & Viewport Integration Tests
//!
//! Tests for:
//! - Zoom clamping under arbitrary wheel deltas
//! - Screen ↔ world mapping and its inverse
//! - Visible bounds derivation
//! - Viewport cursor tracking

use glam::Vec2;
use glowline::{Camera, RenderSettings, Viewport, ViewportOptions};

// ============================================================================
// Zoom
// ============================================================================

#[test]
fn zoom_clamps_no_matter_how_large_the_wheel_delta() {
    let mut camera = Camera::default();
    camera.apply_wheel(1.0e9, 0.05);
    assert_eq!(camera.zoom, camera.zoom_max);

    camera.apply_wheel(-1.0e9, 0.05);
    assert_eq!(camera.zoom, camera.zoom_min);
}

#[test]
fn wheel_steps_scale_by_the_wheel_factor() {
    let mut camera = Camera::default();
    camera.apply_wheel(2.0, 0.05);
    assert!((camera.zoom - 1.1).abs() < 1e-6);
    camera.apply_wheel(-2.0, 0.05);
    assert!((camera.zoom - 1.0).abs() < 1e-6);
}

#[test]
fn set_zoom_clamps_directly() {
    let mut camera = Camera::new(800.0, 600.0, 0.5, 4.0);
    camera.set_zoom(100.0);
    assert_eq!(camera.zoom, 4.0);
    camera.set_zoom(0.0);
    assert_eq!(camera.zoom, 0.5);
}

// ============================================================================
// Screen ↔ World Mapping
// ============================================================================

#[test]
fn screen_center_maps_to_camera_origin() {
    // zoom=2, origin.x=10, width=800: screen x 400 is world x 10.
    let mut camera = Camera::default();
    camera.set_zoom(2.0);
    camera.origin = Vec2::new(10.0, 0.0);

    let world = camera.screen_to_world(Vec2::new(400.0, 300.0));
    assert_eq!(world, Vec2::new(10.0, 0.0));
}

#[test]
fn world_to_screen_inverts_screen_to_world() {
    let mut camera = Camera::default();
    camera.set_zoom(3.5);
    camera.origin = Vec2::new(-42.0, 17.0);

    for screen in [
        Vec2::new(0.0, 0.0),
        Vec2::new(123.0, 456.0),
        Vec2::new(800.0, 600.0),
    ] {
        let round_trip = camera.world_to_screen(camera.screen_to_world(screen));
        assert!((round_trip - screen).length() < 1e-3, "{screen:?}");
    }
}

#[test]
fn zoom_scales_world_distance_per_pixel() {
    let mut camera = Camera::default();
    camera.set_zoom(2.0);
    let a = camera.screen_to_world(Vec2::new(100.0, 300.0));
    let b = camera.screen_to_world(Vec2::new(200.0, 300.0));
    // 100 pixels at zoom 2 is 50 world units.
    assert!((b.x - a.x - 50.0).abs() < 1e-6);
}

// ============================================================================
// Visible Bounds
// ============================================================================

#[test]
fn visible_bounds_cover_viewport_over_zoom() {
    let mut camera = Camera::default();
    camera.set_zoom(2.0);
    camera.origin = Vec2::new(100.0, 50.0);

    let bounds = camera.visible_bounds();
    assert_eq!(bounds.width, 400.0);
    assert_eq!(bounds.height, 300.0);
    assert_eq!(bounds.left, -100.0);
    assert_eq!(bounds.top, -100.0);
    assert_eq!(bounds.right, 300.0);
    assert_eq!(bounds.bottom, 200.0);
}

// ============================================================================
// Viewport Cursor
// ============================================================================

#[test]
fn cursor_tracks_through_camera_transform() {
    let mut viewport = Viewport::new(ViewportOptions::default(), 800.0, 600.0);
    let world = viewport.set_cursor(400.0, 300.0);
    assert_eq!(world, Vec2::ZERO);
    assert!(viewport.cursor_changed() || world == Vec2::ZERO);

    viewport.camera.origin = Vec2::new(25.0, -25.0);
    let mut scene = glowline::Scene::new();
    viewport.update(&mut scene);
    // Same raw cursor, new camera: world cursor follows.
    assert_eq!(viewport.cursor_world(), Vec2::new(25.0, -25.0));
    assert!(viewport.cursor_changed());
}

#[test]
fn wheel_input_respects_configured_clamp() {
    let options = ViewportOptions {
        zoom_min: 0.25,
        zoom_max: 2.0,
        ..ViewportOptions::default()
    };
    let mut viewport = Viewport::new(options, 800.0, 600.0);
    for _ in 0..1000 {
        viewport.on_wheel(5.0);
    }
    assert_eq!(viewport.camera.zoom, 2.0);
}

#[test]
fn viewport_line_width_reaches_render_settings() {
    let options = ViewportOptions {
        line_width: 9.0,
        ..ViewportOptions::default()
    };
    let settings = options.render_settings();
    assert_eq!(settings.line_width, 9.0);
    // Bloom parameters stay at their defaults.
    let defaults = RenderSettings::default();
    assert_eq!(settings.kernel_radii, defaults.kernel_radii);
    assert_eq!(settings.level_weights, defaults.level_weights);
    assert_eq!(settings.bloom_strength, defaults.bloom_strength);
}
