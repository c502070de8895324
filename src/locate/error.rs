use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LocateError {
    #[error("address not found: {0}")]
    AddressNotFound(String),
    #[error("no timezone known near ({latitude_deg}, {longitude_deg})")]
    TimezoneNotFound {
        latitude_deg: f64,
        longitude_deg: f64,
    },
}
