use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ObserverError {
    #[error("invalid observer: {field} {value} outside {range}")]
    InvalidObserver {
        field: &'static str,
        value: f64,
        range: &'static str,
    },
}
