use serde::Deserialize;

use crate::coords::Vec3;
use crate::paint::Color;
use crate::quake::QuakeEvent;
use crate::text::LabelBitmap;

/// Inside-out star sphere surrounding the moon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkyDescriptor {
    pub radius: f64,
    /// Texture file name, passed through to the asset loader unchecked.
    pub texture: String,
}

impl Default for SkyDescriptor {
    fn default() -> Self {
        Self { radius: 10.0, texture: "stars.jpg".to_string() }
    }
}

/// Moon sphere and its PBR material parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MoonDescriptor {
    pub radius: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color_map: String,
    pub normal_map: String,
    pub normal_scale: f32,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for MoonDescriptor {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 50,
            height_segments: 50,
            color_map: "lroc_color_poles_4k.jpg".to_string(),
            normal_map: "ldem_16_uint.jpg".to_string(),
            normal_scale: 4.0,
            metalness: 0.1,
            roughness: 0.5,
        }
    }
}

/// Directional light.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightDescriptor {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl Default for LightDescriptor {
    fn default() -> Self {
        Self {
            color: Color::white(),
            intensity: 1.4,
            position: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Axes helper parented to the moon.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct AxesDescriptor {
    pub size: f64,
}

impl Default for AxesDescriptor {
    fn default() -> Self {
        Self { size: 5000.0 }
    }
}

/// Point sprite style for a marker.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    pub size: f32,
    pub color: Color,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self { size: 0.01, color: Color::white() }
    }
}

/// Text billboard attached to a marker.
///
/// The quad is `bitmap.world_width() × bitmap.world_height()` world units,
/// centred on `position`, textured with `bitmap.pixels`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDescriptor {
    pub position: Vec3,
    pub bitmap: LabelBitmap,
}

/// One quake: point marker plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub event: QuakeEvent,
    pub position: Vec3,
    pub style: PointStyle,
    pub label: LabelDescriptor,
}

/// Everything the external renderer needs to build the viewer scene.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonScene {
    pub sky: SkyDescriptor,
    pub moon: MoonDescriptor,
    pub light: LightDescriptor,
    pub axes: Option<AxesDescriptor>,
    /// In catalog order.
    pub markers: Vec<MarkerDescriptor>,
}
