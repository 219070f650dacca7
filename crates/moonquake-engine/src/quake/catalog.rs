use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::QuakeEvent;

/// Error returned while loading a [`QuakeCatalog`].
#[derive(Debug)]
pub enum CatalogError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: Option<PathBuf>, source: serde_json::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io { path, source } => {
                write!(f, "cannot read quake catalog {}: {source}", path.display())
            }
            CatalogError::Parse { path: Some(path), source } => {
                write!(f, "invalid quake catalog {}: {source}", path.display())
            }
            CatalogError::Parse { path: None, source } => {
                write!(f, "invalid quake catalog: {source}")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io { source, .. } => Some(source),
            CatalogError::Parse { source, .. } => Some(source),
        }
    }
}

/// Ordered list of quake events.
///
/// Iteration order is insertion order, which is the source file's order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuakeCatalog {
    events: Vec<QuakeEvent>,
}

impl QuakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON array of events.
    pub fn from_json_str(src: &str) -> Result<Self, CatalogError> {
        let events = serde_json::from_str(src).map_err(|source| CatalogError::Parse { path: None, source })?;
        Ok(Self { events })
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let events =
            serde_json::from_reader(reader).map_err(|source| CatalogError::Parse { path: None, source })?;
        Ok(Self { events })
    }

    /// Reads and parses a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        let events = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|source| CatalogError::Parse { path: Some(path.to_path_buf()), source })?;
        let catalog = Self { events };
        log::info!("loaded {} quake events from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn push(&mut self, event: QuakeEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> impl Iterator<Item = &QuakeEvent> {
        self.events.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<QuakeEvent> for QuakeCatalog {
    fn from_iter<I: IntoIterator<Item = QuakeEvent>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}
