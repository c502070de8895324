use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use utoipa::ToSchema;

/// A single catalog star. Coordinates are J2000 equatorial degrees.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StarRecord {
    pub id: String,
    pub right_ascension_deg: f64,
    pub declination_deg: f64,
    pub magnitude: f64,
}

/// Immutable star table, cheap to clone and shared read-only between
/// chart computations.
#[derive(Debug, Clone)]
pub struct Catalog {
    stars: Arc<[StarRecord]>,
}

impl Catalog {
    pub fn new(stars: Vec<StarRecord>) -> Self {
        Self {
            stars: stars.into(),
        }
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// (brightest, faintest) magnitude, or `None` for an empty catalog.
    pub fn magnitude_range(&self) -> Option<(f64, f64)> {
        self.stars.iter().fold(None, |range, star| match range {
            None => Some((star.magnitude, star.magnitude)),
            Some((lo, hi)) => Some((lo.min(star.magnitude), hi.max(star.magnitude))),
        })
    }

    /// The `count` brightest stars, brightest first.
    pub fn brightest(&self, count: usize) -> Vec<&StarRecord> {
        let mut sorted: Vec<&StarRecord> = self.stars.iter().collect();
        sorted.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
        sorted.truncate(count);
        sorted
    }
}

/// Outcome of a catalog load: the sound rows plus every row that was skipped.
#[derive(Debug)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub skipped: Vec<super::error::CatalogError>,
}

impl CatalogLoad {
    pub fn summary(&self, source: &Path) -> CatalogSummary {
        let range = self.catalog.magnitude_range();
        CatalogSummary {
            source: source.display().to_string(),
            star_count: self.catalog.len(),
            skipped_rows: self.skipped.iter().map(|e| e.to_string()).collect(),
            brightest_magnitude: range.map(|(lo, _)| lo),
            faintest_magnitude: range.map(|(_, hi)| hi),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub source: String,
    pub star_count: usize,
    pub skipped_rows: Vec<String>,
    pub brightest_magnitude: Option<f64>,
    pub faintest_magnitude: Option<f64>,
}
