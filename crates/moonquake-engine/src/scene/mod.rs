//! Scene description for the moonquake viewer.
//!
//! Responsibilities:
//! - hold the scene configuration (defaults match the published viewer)
//! - project every quake to a marker position
//! - rasterize one label per marker and attach it exactly once
//!
//! Nothing here touches a GPU. The [`MoonScene`] value is handed to whatever
//! 3D engine builds the actual scene graph.

mod composer;
mod config;
mod descriptors;

pub use composer::{MarkerPlacement, SceneComposer, SceneError};
pub use config::{ConfigError, LabelConfig, MarkerConfig, SceneConfig};
pub use descriptors::{
    AxesDescriptor, LabelDescriptor, LightDescriptor, MarkerDescriptor, MoonDescriptor, MoonScene,
    PointStyle, SkyDescriptor,
};
