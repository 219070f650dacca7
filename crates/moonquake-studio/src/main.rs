use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use moonquake_engine::coords::AngleUnit;
use moonquake_engine::logging::{init_logging, LoggingConfig};
use moonquake_engine::quake::QuakeCatalog;
use moonquake_engine::scene::{MarkerDescriptor, MoonScene, SceneComposer, SceneConfig};
use moonquake_engine::text::{find_system_font, FontSystem, SYSTEM_FONT_PATHS};

/// Prepares the moonquake scene: marker positions and label textures.
#[derive(Debug, Parser)]
#[command(name = "moonquake-studio", version)]
struct Args {
    /// Quake catalog, a JSON array of `{type, long, lat, date}` records.
    #[arg(long)]
    quakes: PathBuf,

    /// TrueType/OpenType font for labels. Defaults to a system sans-serif.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Scene configuration JSON; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for label PNGs. Nothing is written when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Catalog angles are in degrees rather than radians.
    #[arg(long)]
    degrees: bool,

    /// Log filter, `env_logger` syntax (e.g. "debug").
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if args.degrees {
        config = config.angle_unit(AngleUnit::Degrees);
    }

    let catalog = QuakeCatalog::load(&args.quakes)?;

    let mut fonts = FontSystem::new();
    let font_bytes = load_font(args.font.as_deref())?;
    let font = fonts.load_font(&font_bytes).context("label font is unusable")?;

    let composer = SceneComposer::new(config, &fonts, font)?;
    let scene = composer.compose(&catalog)?;

    print_markers(&scene);

    if let Some(dir) = &args.out {
        write_labels(&scene, dir)?;
    }

    Ok(())
}

fn load_font(path: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = path {
        return std::fs::read(path).with_context(|| format!("cannot read font {}", path.display()));
    }
    match find_system_font() {
        Some(bytes) => Ok(bytes),
        None => bail!(
            "no label font available; pass --font or install one of: {}",
            SYSTEM_FONT_PATHS.join(", ")
        ),
    }
}

fn print_markers(scene: &MoonScene) {
    println!("{:>4}  {:<8} {:>9} {:>9} {:>9}  {:>9}", "#", "type", "x", "y", "z", "label px");
    for (i, m) in scene.markers.iter().enumerate() {
        let b = &m.label.bitmap;
        println!(
            "{:>4}  {:<8} {:>9.4} {:>9.4} {:>9.4}  {:>4}x{:<4}",
            i,
            m.event.kind,
            m.position.x,
            m.position.y,
            m.position.z,
            b.pixel_width(),
            b.pixel_height(),
        );
    }
    log::info!("{} markers around a moon of radius {}", scene.markers.len(), scene.moon.radius);
}

fn write_labels(scene: &MoonScene, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;

    let mut written = 0usize;
    for (i, marker) in scene.markers.iter().enumerate() {
        if marker.label.bitmap.is_empty() {
            log::warn!("marker {i} ({:?}): empty label, no texture written", marker.event.kind);
            continue;
        }
        let path = dir.join(label_file_name(i, marker));
        marker
            .label
            .bitmap
            .pixels()
            .save(&path)
            .with_context(|| format!("cannot write {}", path.display()))?;
        written += 1;
    }

    log::info!("wrote {written} label textures to {}", dir.display());
    Ok(())
}

fn label_file_name(index: usize, marker: &MarkerDescriptor) -> String {
    let kind: String = marker
        .event
        .kind
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("label-{index:04}-{kind}.png")
}
