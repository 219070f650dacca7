use serde::Deserialize;

/// Unit in which raw latitude/longitude values are supplied.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    /// Converts a raw angle in this unit to radians.
    #[inline]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => value.to_radians(),
        }
    }
}

/// Latitude/longitude pair in radians.
///
/// No range is enforced; callers own validation.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Builds a coordinate from raw values expressed in `unit`.
    #[inline]
    pub fn from_unit(latitude: f64, longitude: f64, unit: AngleUnit) -> Self {
        Self::new(unit.to_radians(latitude), unit.to_radians(longitude))
    }
}
