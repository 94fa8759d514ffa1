//! Scene Data Model
//!
//! A [`Scene`](scene::Scene) is a flat map from name to [`Sprite`](sprite::Sprite);
//! each sprite carries a transform, a color, and a set of polyline
//! [`Shape`](sprite::Shape)s. The [`Camera`](camera::Camera) is a plain value
//! type describing zoom, pan, rotation, and viewport size.

pub mod camera;
pub mod scene;
pub mod sprite;

pub use camera::{Camera, VisibleBounds};
pub use scene::{Scene, BACKDROP_NAME};
pub use sprite::{Shape, Sprite};
