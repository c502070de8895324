//! Location collaborators: address geocoding and timezone lookup.
//!
//! Both are external services in a full deployment; the traits here are
//! the boundary, and [`Gazetteer`] is the offline implementation.

mod error;
mod gazetteer;
mod types;

use chrono_tz::Tz;

pub use error::LocateError;
pub use gazetteer::{default_places, Gazetteer, Place};
pub use types::Coordinates;

/// Free-text address to coordinates.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates, LocateError>;
}

/// Coordinates to the IANA timezone in force there.
pub trait TimezoneLookup {
    fn timezone_at(&self, latitude_deg: f64, longitude_deg: f64) -> Result<Tz, LocateError>;
}
