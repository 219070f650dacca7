use std::fmt;

/// Error returned when a body description is not physically meaningful.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Flattening must lie in `[0, 1)`.
    InvalidFlattening(f64),
    /// Radius must be finite and non-negative.
    InvalidRadius(f64),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::InvalidFlattening(v) => {
                write!(f, "invalid flattening {v}: expected a value in [0, 1)")
            }
            GeoError::InvalidRadius(v) => {
                write!(f, "invalid radius {v}: expected a finite value >= 0")
            }
        }
    }
}

impl std::error::Error for GeoError {}

/// Reference body: mean radius in scene units plus flattening.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Body {
    pub radius: f64,
    pub flattening: f64,
}

impl Body {
    /// The moon as drawn by the viewer: unit sphere.
    pub const MOON: Body = Body { radius: 1.0, flattening: 0.0 };

    /// Validated constructor.
    pub fn new(radius: f64, flattening: f64) -> Result<Self, GeoError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeoError::InvalidRadius(radius));
        }
        check_flattening(flattening)?;
        Ok(Self { radius, flattening })
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::MOON
    }
}

pub(super) fn check_flattening(flattening: f64) -> Result<(), GeoError> {
    if (0.0..1.0).contains(&flattening) {
        Ok(())
    } else {
        Err(GeoError::InvalidFlattening(flattening))
    }
}
