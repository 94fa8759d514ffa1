//! A real-time neon vector-display renderer: animated polyline sprites
//! drawn as uniformly wide, anti-aliased strokes with multi-pass bloom.
//!
//! The pipeline packs every visible sprite into one triangle-strip vertex
//! stream (quad-per-segment expansion in the vertex shader), renders it
//! additively into an offscreen target, runs a progressive ladder of
//! separable Gaussian blurs, and composites the weighted levels back over
//! the sharp image.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod demo;
pub mod errors;
pub mod renderer;
pub mod scene;
pub mod viewport;

pub use errors::GlowlineError;
pub use renderer::context::WgpuContext;
pub use renderer::{RenderSettings, Renderer};
pub use scene::camera::Camera;
pub use scene::scene::Scene;
pub use scene::sprite::{Shape, Sprite};
pub use viewport::{Viewport, ViewportOptions};
