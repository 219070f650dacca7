//! Font loading, text measurement and label rasterization.
//!
//! Labels are drawn on the CPU with fontdue into straight-alpha RGBA bitmaps
//! that an external renderer uploads as billboard textures.

mod font_system;
mod label;
mod system_font;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub use label::{LabelBitmap, LabelError, LabelMetrics, LabelRasterizer, LabelSpec, MAX_LABEL_DIMENSION};
pub use system_font::{find_system_font, SYSTEM_FONT_PATHS};

#[cfg(test)]
pub(crate) fn test_font() -> (FontSystem, FontId) {
    static DEJAVU_SANS: &[u8] = include_bytes!("../../data/fonts/DejaVuSans.ttf");
    let mut fonts = FontSystem::new();
    let id = fonts.load_font(DEJAVU_SANS).expect("bundled DejaVu Sans loads");
    (fonts, id)
}
