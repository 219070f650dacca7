use serde::Deserialize;

/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
///
/// Label bitmaps are stored straight (not premultiplied), matching what a
/// canvas `getImageData` readback would hand a texture upload.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Quantizes to 8-bit channels, clamping out-of-range values.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Same color with alpha scaled by `coverage` (glyph anti-aliasing).
    #[inline]
    pub fn with_coverage(self, coverage: u8) -> Self {
        Self { a: self.a * coverage as f32 / 255.0, ..self }
    }

    /// Source-over composite of `self` onto `dst`, both straight alpha.
    pub fn over(self, dst: Color) -> Color {
        let a = self.a + dst.a * (1.0 - self.a);
        if a <= 0.0 {
            return Color::transparent();
        }
        let mix = |s: f32, d: f32| (s * self.a + d * dst.a * (1.0 - self.a)) / a;
        Color::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), a)
    }
}
