use std::path::Path;

/// Sans-serif fonts tried in order when no font file is configured.
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Returns the bytes of the first readable font in [`SYSTEM_FONT_PATHS`].
pub fn find_system_font() -> Option<Vec<u8>> {
    SYSTEM_FONT_PATHS.iter().find_map(|p| {
        let bytes = std::fs::read(Path::new(p)).ok()?;
        log::debug!("using system font {p}");
        Some(bytes)
    })
}
