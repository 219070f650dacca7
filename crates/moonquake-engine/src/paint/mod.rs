//! Paint primitives for label bitmaps and scene descriptors.

mod color;

pub use color::Color;
