use std::borrow::Cow;
use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::{Rgba, RgbaImage};

use crate::paint::Color;

use super::{FontId, FontSystem};

/// Largest bitmap edge a label may allocate, in pixels.
pub const MAX_LABEL_DIMENSION: u32 = 16_384;

/// Label fill. Background stays fully transparent.
const LABEL_FILL: Color = Color::white();

// ── errors ────────────────────────────────────────────────────────────────

/// Error returned by [`LabelRasterizer::rasterize`].
#[derive(Debug, Clone, PartialEq)]
pub enum LabelError {
    /// The rasterizer's font is not loaded in its font system. Callers should
    /// treat this as a fatal configuration error.
    FontUnavailable(FontId),
    /// Text height and reference pixel height must be finite and positive;
    /// total height must be finite.
    InvalidGeometry {
        text_world_height: f32,
        total_world_height: f32,
        reference_pixel_height: f32,
    },
    /// The computed bitmap exceeds [`MAX_LABEL_DIMENSION`] on some edge.
    TooLarge { width: f32, height: f32 },
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::FontUnavailable(id) => {
                write!(f, "label font {id:?} is not loaded; text rendering unavailable")
            }
            LabelError::InvalidGeometry {
                text_world_height,
                total_world_height,
                reference_pixel_height,
            } => write!(
                f,
                "invalid label geometry: text height {text_world_height}, total height \
                 {total_world_height}, pixel height {reference_pixel_height}"
            ),
            LabelError::TooLarge { width, height } => write!(
                f,
                "label bitmap {width}x{height} exceeds {MAX_LABEL_DIMENSION} pixels"
            ),
        }
    }
}

impl std::error::Error for LabelError {}

// ── spec / metrics ────────────────────────────────────────────────────────

/// Requested label geometry.
///
/// World heights are in scene units; `reference_pixel_height` is the font
/// size the text is rasterized at, which fixes the world-to-pixel scale.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub text: String,
    pub text_world_height: f32,
    pub total_world_height: f32,
    pub reference_pixel_height: f32,
}

impl LabelSpec {
    pub fn new(
        text: impl Into<String>,
        text_world_height: f32,
        total_world_height: f32,
        reference_pixel_height: f32,
    ) -> Self {
        Self {
            text: text.into(),
            text_world_height,
            total_world_height,
            reference_pixel_height,
        }
    }

    fn validate(&self) -> Result<(), LabelError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.text_world_height)
            && ok(self.reference_pixel_height)
            && self.total_world_height.is_finite()
        {
            Ok(())
        } else {
            Err(LabelError::InvalidGeometry {
                text_world_height: self.text_world_height,
                total_world_height: self.total_world_height,
                reference_pixel_height: self.reference_pixel_height,
            })
        }
    }

    /// World-space margin around the text; the same amount is added to both
    /// width and height.
    #[inline]
    pub fn padding(&self) -> f32 {
        self.total_world_height - self.text_world_height
    }
}

/// Pixel and world dimensions of a label, returned alongside its bitmap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelMetrics {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub world_width: f32,
    pub world_height: f32,
    pub text_world_width: f32,
    pub text_pixel_width: f32,
    /// World units per bitmap pixel.
    pub px_to_world: f32,
}

impl LabelMetrics {
    /// Sizes a label whose text measures `text_pixel_width` pixels at the
    /// spec's reference pixel height.
    pub fn compute(text_pixel_width: f32, spec: &LabelSpec) -> Result<Self, LabelError> {
        spec.validate()?;

        let k = spec.text_world_height / spec.reference_pixel_height;
        // world / k, arranged so equal world heights map to exact pixel counts.
        let to_px = |world: f32| world / spec.text_world_height * spec.reference_pixel_height;

        let height_px = to_px(spec.total_world_height).ceil().max(0.0);

        let text_world_width = text_pixel_width * k;
        let world_width = (text_world_width + spec.padding()).max(0.0);
        let width_px = (text_pixel_width + to_px(spec.padding())).ceil().max(0.0);

        let limit = MAX_LABEL_DIMENSION as f32;
        if !(width_px <= limit && height_px <= limit) {
            return Err(LabelError::TooLarge { width: width_px, height: height_px });
        }

        Ok(Self {
            pixel_width: width_px as u32,
            pixel_height: height_px as u32,
            world_width,
            world_height: spec.total_world_height,
            text_world_width,
            text_pixel_width,
            px_to_world: k,
        })
    }
}

/// A rasterized label: straight-alpha RGBA pixels plus their measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBitmap {
    pub metrics: LabelMetrics,
    pub pixels: RgbaImage,
}

impl LabelBitmap {
    #[inline]
    pub fn pixel_width(&self) -> u32 {
        self.metrics.pixel_width
    }

    #[inline]
    pub fn pixel_height(&self) -> u32 {
        self.metrics.pixel_height
    }

    #[inline]
    pub fn world_width(&self) -> f32 {
        self.metrics.world_width
    }

    #[inline]
    pub fn world_height(&self) -> f32 {
        self.metrics.world_height
    }

    #[inline]
    pub fn text_world_width(&self) -> f32 {
        self.metrics.text_world_width
    }

    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// True when no pixel was allocated (empty text without padding).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.metrics.pixel_width == 0 || self.metrics.pixel_height == 0
    }
}

// ── rasterizer ────────────────────────────────────────────────────────────

/// Draws single-line labels centered on a freshly allocated bitmap.
///
/// Each call is independent: no glyph cache, no reused surface.
pub struct LabelRasterizer<'a> {
    fonts: &'a FontSystem,
    font: FontId,
}

impl<'a> LabelRasterizer<'a> {
    pub fn new(fonts: &'a FontSystem, font: FontId) -> Self {
        Self { fonts, font }
    }

    /// Measures, sizes and paints `spec.text`.
    pub fn rasterize(&self, spec: &LabelSpec) -> Result<LabelBitmap, LabelError> {
        let Some(font) = self.fonts.get(self.font) else {
            return Err(LabelError::FontUnavailable(self.font));
        };
        spec.validate()?;

        let size = spec.reference_pixel_height;
        let text = single_line(&spec.text);
        let text_px = self.fonts.measure_text(&text, self.font, size).x;
        let metrics = LabelMetrics::compute(text_px, spec)?;

        let mut pixels = RgbaImage::new(metrics.pixel_width, metrics.pixel_height);

        if spec.text.is_empty() || metrics.pixel_width == 0 || metrics.pixel_height == 0 {
            log::debug!("label {:?}: nothing to paint ({}x{})", spec.text, metrics.pixel_width, metrics.pixel_height);
        } else {
            let (ascent, line_height) = self.fonts.line_extent(self.font, size);
            let origin_x = (metrics.pixel_width as f32 - text_px) / 2.0;
            let origin_y = (metrics.pixel_height as f32 - line_height) / 2.0;
            log::trace!("label {:?}: ascent {ascent}, origin ({origin_x}, {origin_y})", spec.text);
            paint_line(font, &text, size, origin_x, origin_y, &mut pixels);
        }

        log::debug!(
            "label {:?}: {}x{} px, {:.4}x{:.4} world",
            spec.text,
            metrics.pixel_width,
            metrics.pixel_height,
            metrics.world_width,
            metrics.world_height,
        );

        Ok(LabelBitmap { metrics, pixels })
    }
}

/// Labels are one line: control characters (newlines, tabs) become spaces.
fn single_line(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Lays out one line at `(origin_x, origin_y)` (top of the line box) and
/// composites each glyph's coverage in [`LABEL_FILL`].
fn paint_line(
    font: &fontdue::Font,
    text: &str,
    size: f32,
    origin_x: f32,
    origin_y: f32,
    target: &mut RgbaImage,
) {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings {
        x: origin_x,
        y: origin_y,
        wrap_hard_breaks: false,
        ..LayoutSettings::default()
    });
    layout.append(&[font], &TextStyle::new(text, size, 0));

    let (tw, th) = (target.width() as i64, target.height() as i64);

    for glyph in layout.glyphs() {
        if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let (metrics, coverage) = font.rasterize_config(glyph.key);
        let gx = glyph.x.round() as i64;
        let gy = glyph.y.round() as i64;

        for row in 0..metrics.height {
            let y = gy + row as i64;
            if y < 0 || y >= th {
                continue;
            }
            for col in 0..metrics.width {
                let x = gx + col as i64;
                if x < 0 || x >= tw {
                    continue;
                }
                let c = coverage[row * metrics.width + col];
                if c == 0 {
                    continue;
                }
                let px = target.get_pixel_mut(x as u32, y as u32);
                let [dr, dg, db, da] = px.0;
                let out = LABEL_FILL.with_coverage(c).over(Color::from_srgb_u8(dr, dg, db, da));
                *px = Rgba(out.to_rgba8());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::test_font;

    fn assert_close(a: f32, b: f32, eps: f32) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    /// `(min_x, max_x, min_y, max_y, count)` of pixels with any alpha.
    fn ink_bounds(px: &RgbaImage) -> Option<(u32, u32, u32, u32, usize)> {
        let mut bounds: Option<(u32, u32, u32, u32, usize)> = None;
        for (x, y, p) in px.enumerate_pixels() {
            if p.0[3] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, x, y, y, 1),
                Some((x0, x1, y0, y1, n)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y), n + 1),
            });
        }
        bounds
    }

    // ── pure sizing ───────────────────────────────────────────────────────

    #[test]
    fn metrics_without_padding() {
        let spec = LabelSpec::new("M5", 0.05, 0.05, 100.0);
        let m = LabelMetrics::compute(130.0, &spec).unwrap();
        assert_eq!(m.pixel_height, 100);
        assert_eq!(m.pixel_width, 130);
        assert_close(m.world_width, 0.065, 1e-6);
        assert_close(m.text_world_width, 0.065, 1e-6);
        assert_eq!(m.world_height, 0.05);
    }

    #[test]
    fn metrics_with_padding() {
        let spec = LabelSpec::new("M5", 1.0, 1.5, 10.0);
        let m = LabelMetrics::compute(20.0, &spec).unwrap();
        assert_eq!(m.pixel_height, 15);
        // 20 px of text + 0.5 world (5 px) of padding.
        assert_eq!(m.pixel_width, 25);
        assert_close(m.world_width, 2.5, 1e-6);
    }

    #[test]
    fn fractional_measurements_round_up() {
        let spec = LabelSpec::new("x", 1.0, 1.0, 10.0);
        let m = LabelMetrics::compute(12.2, &spec).unwrap();
        assert_eq!(m.pixel_width, 13);
    }

    #[test]
    fn pixel_width_reproduces_world_width() {
        let spec = LabelSpec::new("abc", 0.05, 0.08, 100.0);
        for text_px in [0.0, 1.0, 33.3, 97.5, 250.01] {
            let m = LabelMetrics::compute(text_px, &spec).unwrap();
            let back = m.pixel_width as f32 * m.px_to_world;
            assert!(back >= m.world_width - 1e-6);
            assert!(back - m.world_width <= m.px_to_world + 1e-6);
        }
    }

    #[test]
    fn empty_text_is_padding_only() {
        let spec = LabelSpec::new("", 0.05, 0.05, 100.0);
        let m = LabelMetrics::compute(0.0, &spec).unwrap();
        assert_eq!(m.pixel_width, 0);

        let padded = LabelSpec::new("", 1.0, 1.25, 8.0);
        let m = LabelMetrics::compute(0.0, &padded).unwrap();
        assert_eq!(m.pixel_width, 2);
        assert_eq!(m.pixel_height, 10);
    }

    #[test]
    fn negative_padding_clamps_to_zero() {
        let spec = LabelSpec::new("", 1.0, 0.5, 10.0);
        let m = LabelMetrics::compute(0.0, &spec).unwrap();
        assert_eq!(m.pixel_width, 0);
        assert_eq!(m.world_width, 0.0);
    }

    #[test]
    fn rejects_non_positive_pixel_height() {
        let spec = LabelSpec::new("M5", 0.05, 0.05, 0.0);
        assert!(matches!(
            LabelMetrics::compute(10.0, &spec),
            Err(LabelError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_text_height() {
        let spec = LabelSpec::new("M5", -1.0, 0.05, 100.0);
        assert!(LabelMetrics::compute(10.0, &spec).is_err());
    }

    #[test]
    fn rejects_non_finite_total_height() {
        for total in [f32::NAN, f32::INFINITY] {
            let spec = LabelSpec::new("M5", 0.05, total, 100.0);
            assert!(matches!(
                LabelMetrics::compute(130.0, &spec),
                Err(LabelError::InvalidGeometry { .. })
            ));
        }
    }

    #[test]
    fn rasterize_rejects_nan_total_height() {
        let (fonts, id) = test_font();
        let r = LabelRasterizer::new(&fonts, id);
        let err = r.rasterize(&LabelSpec::new("M5", 0.05, f32::NAN, 100.0)).unwrap_err();
        assert!(matches!(err, LabelError::InvalidGeometry { .. }));
    }

    #[test]
    fn rejects_oversized_bitmaps() {
        let spec = LabelSpec::new("M5", 0.001, 100.0, 100.0);
        assert!(matches!(
            LabelMetrics::compute(10.0, &spec),
            Err(LabelError::TooLarge { .. })
        ));
    }

    // ── rasterizer ────────────────────────────────────────────────────────

    #[test]
    fn missing_font_is_reported() {
        let fonts = FontSystem::new();
        let r = LabelRasterizer::new(&fonts, FontId(0));
        let err = r.rasterize(&LabelSpec::new("M5", 0.05, 0.05, 100.0)).unwrap_err();
        assert_eq!(err, LabelError::FontUnavailable(FontId(0)));
    }

    #[test]
    fn bitmap_matches_metrics() {
        let (fonts, id) = test_font();
        let r = LabelRasterizer::new(&fonts, id);
        let label = r.rasterize(&LabelSpec::new("M5", 0.05, 0.05, 100.0)).unwrap();
        assert_eq!(label.pixels().width(), label.pixel_width());
        assert_eq!(label.pixels().height(), label.pixel_height());
        assert_eq!(label.pixel_height(), 100);
        assert!(label.pixel_width() as f32 >= label.metrics.text_pixel_width);
        assert_close(label.pixel_width() as f32 * label.metrics.px_to_world, label.world_width(), 0.0005);
    }

    #[test]
    fn paints_white_on_transparent() {
        let (fonts, id) = test_font();
        let r = LabelRasterizer::new(&fonts, id);
        let label = r.rasterize(&LabelSpec::new("M5", 0.05, 0.08, 100.0)).unwrap();
        let px = label.pixels();
        assert_eq!(px.get_pixel(0, 0).0[3], 0);
        let painted: Vec<_> = px.pixels().filter(|p| p.0[3] > 0).collect();
        assert!(!painted.is_empty());
        assert!(painted.iter().all(|p| p.0[..3] == [255, 255, 255]));
    }

    #[test]
    fn text_is_centered() {
        let (fonts, id) = test_font();
        let r = LabelRasterizer::new(&fonts, id);
        let label = r.rasterize(&LabelSpec::new("HH", 0.05, 0.1, 100.0)).unwrap();
        let px = label.pixels();

        let (min_x, max_x, min_y, max_y, _) = ink_bounds(px).unwrap();
        let left = min_x as f32;
        let right = (px.width() - 1 - max_x) as f32;
        let top = min_y as f32;
        let bottom = (px.height() - 1 - max_y) as f32;
        // Side bearings and the ascent/descent split skew ink a little.
        assert!((left - right).abs() <= 0.15 * px.width() as f32, "left {left} right {right}");
        assert!(left > 0.0 && right > 0.0);
        assert!(top > 0.0 && bottom > 0.0, "top {top} bottom {bottom}");
    }

    #[test]
    fn control_characters_become_spaces() {
        assert_eq!(single_line("M5"), "M5");
        assert_eq!(single_line("M5\nM5\t!"), "M5 M5 !");
    }

    #[test]
    fn newline_is_drawn_on_one_line() {
        let (fonts, id) = test_font();
        let r = LabelRasterizer::new(&fonts, id);
        let one = r.rasterize(&LabelSpec::new("M5", 0.05, 0.05, 100.0)).unwrap();
        let two = r.rasterize(&LabelSpec::new("M5\nM5", 0.05, 0.05, 100.0)).unwrap();

        let (_, one_right, _, _, one_count) = ink_bounds(one.pixels()).unwrap();
        let (_, two_right, _, two_bottom, two_count) = ink_bounds(two.pixels()).unwrap();
        assert!(two_right > one_right, "second line was dropped");
        assert!(two_count > one_count);
        assert!(two_right < two.pixel_width() - 1, "ink reaches the last column");
        assert!(two_bottom < two.pixel_height() - 1, "ink reaches the last row");
    }

    #[test]
    fn unpadded_descenders_clip_at_line_box() {
        // The font line box (ascent - descent) is taller than the reference
        // pixel height, so without padding it overhangs the bitmap: caps fit,
        // descenders are cut at the bottom edge as a canvas would cut them.
        let (fonts, id) = test_font();
        let r = LabelRasterizer::new(&fonts, id);

        let caps = r.rasterize(&LabelSpec::new("HH", 0.05, 0.05, 100.0)).unwrap();
        let (_, _, top, bottom, _) = ink_bounds(caps.pixels()).unwrap();
        assert!(top > 0 && bottom < caps.pixel_height() - 1);

        let desc = r.rasterize(&LabelSpec::new("gy", 0.05, 0.05, 100.0)).unwrap();
        assert_eq!(desc.pixel_height(), 100);
        let (_, _, top, bottom, _) = ink_bounds(desc.pixels()).unwrap();
        assert!(top > 0);
        assert_eq!(bottom, desc.pixel_height() - 1);

        // Padding equal to the overhang keeps descenders inside.
        let padded = r.rasterize(&LabelSpec::new("gy", 0.05, 0.07, 100.0)).unwrap();
        let (_, _, _, bottom, _) = ink_bounds(padded.pixels()).unwrap();
        assert!(bottom < padded.pixel_height() - 1);
    }

    #[test]
    fn empty_text_does_not_panic() {
        let (fonts, id) = test_font();
        let r = LabelRasterizer::new(&fonts, id);
        let label = r.rasterize(&LabelSpec::new("", 0.05, 0.05, 100.0)).unwrap();
        assert_eq!(label.pixel_width(), 0);
        assert!(label.is_empty());
    }

    #[test]
    fn repeated_calls_have_identical_dimensions() {
        let (fonts, id) = test_font();
        let r = LabelRasterizer::new(&fonts, id);
        let spec = LabelSpec::new("M3.2 shallow", 0.05, 0.07, 64.0);
        let a = r.rasterize(&spec).unwrap();
        let b = r.rasterize(&spec).unwrap();
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.pixels.dimensions(), b.pixels.dimensions());
    }
}
