use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::error::LocateError;
use super::types::Coordinates;
use super::{Geocoder, TimezoneLookup};

const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Place {
    pub name: String,
    #[serde(alias = "latitude")]
    pub latitude_deg: f64,
    #[serde(alias = "longitude")]
    pub longitude_deg: f64,
    #[serde(default)]
    pub elevation_m: Option<f64>,
    pub timezone: Tz,
}

impl Place {
    fn new(name: &str, latitude_deg: f64, longitude_deg: f64, timezone: Tz) -> Self {
        Self {
            name: name.to_string(),
            latitude_deg,
            longitude_deg,
            elevation_m: None,
            timezone,
        }
    }

    fn at_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation_m = Some(elevation_m);
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude_deg: self.latitude_deg,
            longitude_deg: self.longitude_deg,
            elevation_m: self.elevation_m,
        }
    }
}

/// Offline table of named places. Geocodes by name (or a literal
/// `lat, lon` pair) and answers timezone lookups from the nearest place
/// within a distance limit.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: Vec<Place>,
    max_timezone_distance_km: f64,
}

impl Gazetteer {
    pub fn new(places: Vec<Place>, max_timezone_distance_km: f64) -> Self {
        Self {
            places,
            max_timezone_distance_km,
        }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Case-insensitive lookup. `"Boston, MA"` also matches a place named
    /// `"Boston"`.
    pub fn find(&self, name: &str) -> Option<&Place> {
        let wanted = name.trim().to_lowercase();
        let head = wanted.split(',').next().unwrap_or_default().trim().to_string();
        self.places
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
            .or_else(|| self.places.iter().find(|p| p.name.to_lowercase() == head))
    }

    /// Nearest place and its great-circle distance in km.
    pub fn nearest(&self, latitude_deg: f64, longitude_deg: f64) -> Option<(&Place, f64)> {
        self.places
            .iter()
            .map(|p| {
                let d = great_circle_km(latitude_deg, longitude_deg, p.latitude_deg, p.longitude_deg);
                (p, d)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new(default_places(), 500.0)
    }
}

impl Geocoder for Gazetteer {
    fn geocode(&self, address: &str) -> Result<Coordinates, LocateError> {
        if let Some((latitude_deg, longitude_deg)) = parse_coordinate_pair(address) {
            return Ok(Coordinates {
                latitude_deg,
                longitude_deg,
                elevation_m: None,
            });
        }
        self.find(address)
            .map(Place::coordinates)
            .ok_or_else(|| LocateError::AddressNotFound(address.to_string()))
    }
}

impl TimezoneLookup for Gazetteer {
    fn timezone_at(&self, latitude_deg: f64, longitude_deg: f64) -> Result<Tz, LocateError> {
        match self.nearest(latitude_deg, longitude_deg) {
            Some((place, distance)) if distance <= self.max_timezone_distance_km => {
                log::debug!(
                    "Timezone {} from {} ({:.0} km away)",
                    place.timezone,
                    place.name,
                    distance
                );
                Ok(place.timezone)
            }
            _ => Err(LocateError::TimezoneNotFound {
                latitude_deg,
                longitude_deg,
            }),
        }
    }
}

fn parse_coordinate_pair(s: &str) -> Option<(f64, f64)> {
    let (lat, lon) = s.split_once(',')?;
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dphi = phi2 - phi1;
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Built-in places used when the configuration lists none.
pub fn default_places() -> Vec<Place> {
    vec![
        Place::new("Boston", 42.3601, -71.0589, Tz::America__New_York),
        Place::new("New York", 40.7128, -74.0060, Tz::America__New_York),
        Place::new("Chicago", 41.8781, -87.6298, Tz::America__Chicago),
        Place::new("Denver", 39.7392, -104.9903, Tz::America__Denver),
        Place::new("Los Angeles", 34.0522, -118.2437, Tz::America__Los_Angeles),
        Place::new("Mauna Kea", 19.8207, -155.4681, Tz::Pacific__Honolulu).at_elevation(4205.0),
        Place::new("Santiago", -33.4489, -70.6693, Tz::America__Santiago),
        Place::new("Cerro Paranal", -24.6275, -70.4044, Tz::America__Santiago)
            .at_elevation(2635.0),
        Place::new("Reykjavik", 64.1466, -21.9426, Tz::Atlantic__Reykjavik),
        Place::new("London", 51.5074, -0.1278, Tz::Europe__London),
        Place::new("Greenwich", 51.4769, -0.0005, Tz::Europe__London).at_elevation(46.0),
        Place::new("Paris", 48.8566, 2.3522, Tz::Europe__Paris),
        Place::new("Berlin", 52.5200, 13.4050, Tz::Europe__Berlin),
        Place::new("Cape Town", -33.9249, 18.4241, Tz::Africa__Johannesburg),
        Place::new("Tokyo", 35.6762, 139.6503, Tz::Asia__Tokyo),
        Place::new("Sydney", -33.8688, 151.2093, Tz::Australia__Sydney),
    ]
}
