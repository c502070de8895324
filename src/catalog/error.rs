use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {0}")]
    NotFound(String),
    #[error("catalog read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog format error: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog header has no {0} column")]
    MissingColumn(&'static str),
    #[error("malformed catalog entry at line {line}: {reason}")]
    MalformedCatalogEntry { line: u64, reason: String },
}
