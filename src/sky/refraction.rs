use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const STANDARD_PRESSURE_HPA: f64 = 1010.0;
const STANDARD_TEMPERATURE_C: f64 = 10.0;

/// Atmospheric refraction after Sæmundsson, scaled for local pressure and
/// temperature. Applies only at or above the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct Refraction {
    pub pressure_hpa: f64,
    pub temperature_c: f64,
}

impl Default for Refraction {
    fn default() -> Self {
        Self {
            pressure_hpa: STANDARD_PRESSURE_HPA,
            temperature_c: STANDARD_TEMPERATURE_C,
        }
    }
}

impl Refraction {
    /// Refraction in degrees for a true (geometric) altitude.
    pub fn correction_deg(&self, altitude_deg: f64) -> f64 {
        if altitude_deg < 0.0 {
            return 0.0;
        }
        let arcmin = 1.02 / (altitude_deg + 10.3 / (altitude_deg + 5.11)).to_radians().tan();
        let scale = (self.pressure_hpa / STANDARD_PRESSURE_HPA)
            * (283.0 / (273.0 + self.temperature_c));
        // the formula turns slightly negative right at the zenith
        (arcmin * scale / 60.0).max(0.0)
    }

    /// Apparent altitude for a true altitude. Below-horizon values pass
    /// through unchanged.
    pub fn apply(&self, altitude_deg: f64) -> f64 {
        (altitude_deg + self.correction_deg(altitude_deg)).min(90.0)
    }
}
