//! Geographic projection onto the moon.
//!
//! Latitude/longitude (radians) plus radius and altitude are mapped to
//! body-centred cartesian coordinates. The projector carries a flattening
//! coefficient so an ellipsoidal body can be described; the moon itself is
//! modelled as a sphere (flattening `0`).

mod body;
mod projector;

pub use body::{Body, GeoError};
pub use projector::{project, GeoProjector};
