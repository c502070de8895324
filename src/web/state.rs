use std::path::Path;
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogLoad, CatalogSummary};
use crate::config::Config;
use crate::locate::Gazetteer;

/// Shared, read-only server state. Every request reads the same catalog.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    pub catalog_summary: Arc<CatalogSummary>,
    pub gazetteer: Arc<Gazetteer>,
}

impl AppState {
    pub fn new(config: Config, load: CatalogLoad, source: &Path) -> Self {
        let catalog_summary = Arc::new(load.summary(source));
        let gazetteer = Arc::new(config.gazetteer());
        Self {
            config: Arc::new(config),
            catalog: load.catalog,
            catalog_summary,
            gazetteer,
        }
    }
}
