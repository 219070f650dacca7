use serde::{Deserialize, Serialize};

use crate::coords::{AngleUnit, GeoCoordinate};

/// One moonquake record.
///
/// Field names on the wire follow the published data set: `type`, `long`,
/// `lat`, `date`. Angles are stored raw; the unit is a catalog-level choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeEvent {
    /// Event class shown on the label, e.g. `"M5"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "long")]
    pub longitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Event time as given by the source (epoch based).
    #[serde(rename = "date", default)]
    pub timestamp: f64,
}

impl QuakeEvent {
    pub fn new(kind: impl Into<String>, latitude: f64, longitude: f64, timestamp: f64) -> Self {
        Self { kind: kind.into(), longitude, latitude, timestamp }
    }

    #[inline]
    pub fn coordinate(&self, unit: AngleUnit) -> GeoCoordinate {
        GeoCoordinate::from_unit(self.latitude, self.longitude, unit)
    }
}
