//! Moonquake event records and the catalog that loads them.

mod catalog;
mod event;

pub use catalog::{CatalogError, QuakeCatalog};
pub use event::QuakeEvent;
