mod error;
mod loader;
mod types;

pub use loader::{load_catalog, load_catalog_from_reader};
pub use types::{Catalog, CatalogLoad, CatalogSummary, StarRecord};
