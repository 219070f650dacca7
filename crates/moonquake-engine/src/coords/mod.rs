//! Coordinate and geometry types shared across the engine.
//!
//! Two spaces are in play:
//! - label bitmap space: pixels, origin top-left, +X right, +Y down (`Vec2`)
//! - moon world space: body-centred cartesian, +Z through the north pole (`Vec3`)
//!
//! Geographic input is carried in radians by `GeoCoordinate`.

mod geo_coordinate;
mod vec2;
mod vec3;

pub use geo_coordinate::{AngleUnit, GeoCoordinate};
pub use vec2::Vec2;
pub use vec3::Vec3;
