use serde::Serialize;
use utoipa::ToSchema;

/// Altitude above the horizon and azimuth from north through east, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct HorizontalPosition {
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
}

impl HorizontalPosition {
    pub fn is_above_horizon(&self) -> bool {
        self.altitude_deg >= 0.0
    }
}
