//! Moonquake engine crate.
//!
//! This crate owns the CPU-side pieces of the moonquake viewer: geographic
//! projection onto the moon, label rasterization, the quake catalog and the
//! renderer-agnostic scene description handed to an external 3D engine.

pub mod coords;
pub mod geo;
pub mod logging;
pub mod paint;
pub mod quake;
pub mod scene;
pub mod text;
