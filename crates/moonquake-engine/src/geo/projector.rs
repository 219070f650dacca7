use crate::coords::{GeoCoordinate, Vec3};

use super::body::{check_flattening, Body, GeoError};

/// Maps geographic coordinates to body-centred cartesian points.
///
/// The radius term is placed on the reduced latitude
/// `atan((1 - f)² · tan(lat))`, the altitude term on the geodetic latitude.
/// With `f = 0` both coincide and the result lies on a sphere.
///
/// Pure: output depends only on the inputs and the stored flattening.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GeoProjector {
    flattening: f64,
}

impl GeoProjector {
    /// Projector for a perfect sphere.
    pub const fn sphere() -> Self {
        Self { flattening: 0.0 }
    }

    /// Projector for an ellipsoid with flattening `f` in `[0, 1)`.
    pub fn with_flattening(flattening: f64) -> Result<Self, GeoError> {
        check_flattening(flattening)?;
        Ok(Self { flattening })
    }

    pub fn for_body(body: &Body) -> Self {
        Self { flattening: body.flattening }
    }

    #[inline]
    pub fn flattening(&self) -> f64 {
        self.flattening
    }

    /// Projects `(latitude, longitude)` in radians at `radius` plus `altitude`.
    ///
    /// Every real input is accepted. NaN and infinities propagate.
    pub fn project(&self, latitude: f64, longitude: f64, radius: f64, altitude: f64) -> Vec3 {
        let ls = self.latitude_substitute(latitude);

        let (sin_lon, cos_lon) = longitude.sin_cos();
        let (sin_ls, cos_ls) = ls.sin_cos();
        let (sin_lat, cos_lat) = latitude.sin_cos();

        Vec3::new(
            radius * cos_ls * cos_lon + altitude * cos_lat * cos_lon,
            radius * cos_ls * sin_lon + altitude * cos_lat * sin_lon,
            radius * sin_ls + altitude * sin_lat,
        )
    }

    #[inline]
    pub fn project_coordinate(&self, coordinate: GeoCoordinate, radius: f64, altitude: f64) -> Vec3 {
        self.project(coordinate.latitude, coordinate.longitude, radius, altitude)
    }

    fn latitude_substitute(&self, latitude: f64) -> f64 {
        let squash = (1.0 - self.flattening) * (1.0 - self.flattening);
        let tan = latitude.tan();
        if !tan.is_finite() && latitude.is_finite() {
            // Exact pole in a representation where tan overflows.
            return latitude;
        }
        (squash * tan).atan()
    }
}

/// Sphere projection, the moon's default.
#[inline]
pub fn project(latitude: f64, longitude: f64, radius: f64, altitude: f64) -> Vec3 {
    GeoProjector::sphere().project(latitude, longitude, radius, altitude)
}
