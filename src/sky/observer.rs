use serde::Serialize;
use utoipa::ToSchema;

use super::error::ObserverError;

/// Geodetic position of the observer. Longitude is east-positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Observer {
    latitude_deg: f64,
    longitude_deg: f64,
    elevation_m: Option<f64>,
}

impl Observer {
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: Option<f64>,
    ) -> Result<Self, ObserverError> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ObserverError::InvalidObserver {
                field: "latitude",
                value: latitude_deg,
                range: "[-90, 90]",
            });
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(ObserverError::InvalidObserver {
                field: "longitude",
                value: longitude_deg,
                range: "[-180, 180]",
            });
        }
        if let Some(elevation) = elevation_m {
            if !elevation.is_finite() {
                return Err(ObserverError::InvalidObserver {
                    field: "elevation",
                    value: elevation,
                    range: "finite meters",
                });
            }
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }
}
