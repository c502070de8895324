use serde::Serialize;
use utoipa::ToSchema;

/// Result of geocoding an address. Longitude is east-positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Coordinates {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_m: Option<f64>,
}
