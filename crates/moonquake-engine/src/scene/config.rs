use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::coords::{AngleUnit, Vec3};
use crate::text::LabelSpec;

use super::descriptors::{AxesDescriptor, LightDescriptor, MoonDescriptor, PointStyle, SkyDescriptor};

/// Error returned by [`SceneConfig::load`] and [`SceneConfig::from_json_str`].
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: Option<PathBuf>, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read scene config {}: {source}", path.display())
            }
            ConfigError::Parse { path: Some(path), source } => {
                write!(f, "invalid scene config {}: {source}", path.display())
            }
            ConfigError::Parse { path: None, source } => write!(f, "invalid scene config: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Where and how quake markers are placed.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Distance from the moon's centre; slightly above the unit surface so
    /// points are not swallowed by the terrain normal map.
    pub radius: f64,
    pub altitude: f64,
    pub style: PointStyle,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self { radius: 1.03, altitude: 0.0, style: PointStyle::default() }
    }
}

/// Label geometry shared by every marker.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub text_world_height: f32,
    pub total_world_height: f32,
    pub reference_pixel_height: f32,
    /// Label centre relative to its marker.
    pub offset: Vec3,
}

impl LabelConfig {
    pub fn spec(&self, text: &str) -> LabelSpec {
        LabelSpec::new(text, self.text_world_height, self.total_world_height, self.reference_pixel_height)
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            text_world_height: 0.05,
            total_world_height: 0.05,
            reference_pixel_height: 100.0,
            offset: Vec3::new(0.0, 0.02, 0.0),
        }
    }
}

/// Scene configuration.
///
/// Every field has a default; JSON files only need the keys they change.
/// Builder methods mirror the most common overrides.
///
/// ```rust,ignore
/// let config = SceneConfig::new()
///     .marker_radius(1.05)
///     .angle_unit(AngleUnit::Degrees);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub flattening: f64,
    pub angle_unit: AngleUnit,
    pub marker: MarkerConfig,
    pub label: LabelConfig,
    pub sky: SkyDescriptor,
    pub moon: MoonDescriptor,
    pub light: LightDescriptor,
    /// `None` drops the axes helper.
    pub axes: Option<AxesDescriptor>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            flattening: 0.0,
            angle_unit: AngleUnit::Radians,
            marker: MarkerConfig::default(),
            label: LabelConfig::default(),
            sky: SkyDescriptor::default(),
            moon: MoonDescriptor::default(),
            light: LightDescriptor::default(),
            axes: Some(AxesDescriptor::default()),
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(src).map_err(|source| ConfigError::Parse { path: None, source })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = serde_json::from_str(&src)
            .map_err(|source| ConfigError::Parse { path: Some(path.to_path_buf()), source })?;
        log::debug!("scene config loaded from {}", path.display());
        Ok(config)
    }

    // ── builder ───────────────────────────────────────────────────────────

    pub fn flattening(mut self, f: f64) -> Self {
        self.flattening = f;
        self
    }

    pub fn angle_unit(mut self, unit: AngleUnit) -> Self {
        self.angle_unit = unit;
        self
    }

    pub fn marker_radius(mut self, radius: f64) -> Self {
        self.marker.radius = radius;
        self
    }

    pub fn marker_altitude(mut self, altitude: f64) -> Self {
        self.marker.altitude = altitude;
        self
    }

    /// Text height and total billboard height, both in world units.
    pub fn label_heights(mut self, text: f32, total: f32) -> Self {
        self.label.text_world_height = text;
        self.label.total_world_height = total;
        self
    }

    pub fn label_pixel_height(mut self, px: f32) -> Self {
        self.label.reference_pixel_height = px;
        self
    }

    pub fn label_offset(mut self, offset: Vec3) -> Self {
        self.label.offset = offset;
        self
    }

    pub fn axes(mut self, axes: Option<AxesDescriptor>) -> Self {
        self.axes = axes;
        self
    }
}
