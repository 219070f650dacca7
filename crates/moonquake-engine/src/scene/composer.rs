use std::fmt;

use crate::coords::Vec3;
use crate::geo::{GeoError, GeoProjector};
use crate::quake::{QuakeCatalog, QuakeEvent};
use crate::text::{FontId, FontSystem, LabelError, LabelRasterizer};

use super::config::SceneConfig;
use super::descriptors::{LabelDescriptor, MarkerDescriptor, MoonScene};

/// Error returned while composing a [`MoonScene`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    Geo(GeoError),
    Label { kind: String, source: LabelError },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Geo(e) => write!(f, "scene projection: {e}"),
            SceneError::Label { kind, source } => write!(f, "label for quake {kind:?}: {source}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Geo(e) => Some(e),
            SceneError::Label { source, .. } => Some(source),
        }
    }
}

impl From<GeoError> for SceneError {
    fn from(e: GeoError) -> Self {
        SceneError::Geo(e)
    }
}

/// Marker position without a label.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerPlacement {
    /// Index into the catalog.
    pub index: usize,
    pub position: Vec3,
}

/// Turns a quake catalog into a [`MoonScene`].
pub struct SceneComposer<'a> {
    config: SceneConfig,
    projector: GeoProjector,
    labels: LabelRasterizer<'a>,
}

impl<'a> SceneComposer<'a> {
    /// Fails if the configured flattening is outside `[0, 1)`.
    pub fn new(config: SceneConfig, fonts: &'a FontSystem, font: FontId) -> Result<Self, SceneError> {
        let projector = GeoProjector::with_flattening(config.flattening)?;
        Ok(Self { config, projector, labels: LabelRasterizer::new(fonts, font) })
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Marker position for one event.
    pub fn marker_position(&self, event: &QuakeEvent) -> Vec3 {
        let coordinate = event.coordinate(self.config.angle_unit);
        self.projector
            .project_coordinate(coordinate, self.config.marker.radius, self.config.marker.altitude)
    }

    /// Positions for every event, in catalog order. No labels are drawn.
    pub fn place_markers(&self, catalog: &QuakeCatalog) -> Vec<MarkerPlacement> {
        catalog
            .events()
            .enumerate()
            .map(|(index, event)| MarkerPlacement { index, position: self.marker_position(event) })
            .collect()
    }

    /// Builds the full scene: base meshes plus one marker and one label per event.
    pub fn compose(&self, catalog: &QuakeCatalog) -> Result<MoonScene, SceneError> {
        let mut markers = Vec::with_capacity(catalog.len());

        for event in catalog.events() {
            markers.push(self.marker(event)?);
        }

        let non_finite = markers.iter().filter(|m| !m.position.is_finite()).count();
        if non_finite > 0 {
            log::warn!("{non_finite} marker(s) have non-finite positions; check catalog angles");
        }
        log::debug!("composed moon scene with {} markers", markers.len());

        Ok(MoonScene {
            sky: self.config.sky.clone(),
            moon: self.config.moon.clone(),
            light: self.config.light,
            axes: self.config.axes,
            markers,
        })
    }

    fn marker(&self, event: &QuakeEvent) -> Result<MarkerDescriptor, SceneError> {
        let position = self.marker_position(event);
        let bitmap = self
            .labels
            .rasterize(&self.config.label.spec(&event.kind))
            .map_err(|source| SceneError::Label { kind: event.kind.clone(), source })?;

        Ok(MarkerDescriptor {
            event: event.clone(),
            position,
            style: self.config.marker.style,
            label: LabelDescriptor { position: position + self.config.label.offset, bitmap },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::AngleUnit;
    use crate::text::test_font;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn catalog() -> QuakeCatalog {
        QuakeCatalog::from_json_str(
            r#"[
                {"type": "M5", "long": 0.0, "lat": 0.0, "date": 0},
                {"type": "A1", "long": 1.5707963267948966, "lat": 0.0, "date": 1},
                {"type": "",   "long": 0.0, "lat": 1.5707963267948966, "date": 2}
            ]"#,
        )
        .unwrap()
    }

    // ── placement ─────────────────────────────────────────────────────────

    #[test]
    fn single_event_at_marker_radius() {
        let fonts = FontSystem::new();
        let composer = SceneComposer::new(SceneConfig::default(), &fonts, FontId(0)).unwrap();
        let placed = composer.place_markers(&catalog());
        let p = placed[0].position;
        assert_close(p.x, 1.03, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);
    }

    #[test]
    fn placements_keep_catalog_order() {
        let fonts = FontSystem::new();
        let composer = SceneComposer::new(SceneConfig::default(), &fonts, FontId(0)).unwrap();
        let placed = composer.place_markers(&catalog());
        let idx: Vec<_> = placed.iter().map(|p| p.index).collect();
        assert_eq!(idx, [0, 1, 2]);
        assert_close(placed[1].position.y, 1.03, 1e-12);
        assert_close(placed[2].position.z, 1.03, 1e-12);
    }

    #[test]
    fn degrees_catalog() {
        let fonts = FontSystem::new();
        let config = SceneConfig::new().angle_unit(AngleUnit::Degrees).marker_radius(1.0);
        let composer = SceneComposer::new(config, &fonts, FontId(0)).unwrap();
        let p = composer.marker_position(&QuakeEvent::new("M5", 0.0, 90.0, 0.0));
        assert_close(p.y, 1.0, 1e-12);
    }

    #[test]
    fn invalid_flattening_is_rejected() {
        let fonts = FontSystem::new();
        let err = SceneComposer::new(SceneConfig::new().flattening(1.5), &fonts, FontId(0)).err();
        assert_eq!(err, Some(SceneError::Geo(GeoError::InvalidFlattening(1.5))));
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn missing_font_fails_compose() {
        let fonts = FontSystem::new();
        let composer = SceneComposer::new(SceneConfig::default(), &fonts, FontId(0)).unwrap();
        let err = composer.compose(&catalog()).unwrap_err();
        assert!(matches!(err, SceneError::Label { source: LabelError::FontUnavailable(_), .. }));
    }

    #[test]
    fn empty_catalog_composes_base_scene() {
        let fonts = FontSystem::new();
        let composer = SceneComposer::new(SceneConfig::default(), &fonts, FontId(0)).unwrap();
        let scene = composer.compose(&QuakeCatalog::new()).unwrap();
        assert!(scene.markers.is_empty());
        assert_eq!(scene.sky.texture, "stars.jpg");
        assert_eq!(scene.moon.normal_map, "ldem_16_uint.jpg");
    }

    #[test]
    fn one_label_per_marker_lifted_above_it() {
        let (fonts, font) = test_font();
        let composer = SceneComposer::new(SceneConfig::default(), &fonts, font).unwrap();

        let scene = composer.compose(&catalog()).unwrap();
        assert_eq!(scene.markers.len(), 3);

        let first = &scene.markers[0];
        assert_eq!(first.event.kind, "M5");
        assert_close(first.label.position.x, 1.03, 1e-12);
        assert_close(first.label.position.y, 0.02, 1e-12);
        assert_eq!(first.label.bitmap.pixel_height(), 100);
        assert!(first.label.bitmap.pixel_width() > 0);

        // Empty event type still yields a (degenerate) label.
        assert!(scene.markers[2].label.bitmap.is_empty());
    }
}
