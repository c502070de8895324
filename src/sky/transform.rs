use crate::angle::normalize_degrees;
use crate::catalog::StarRecord;
use crate::timeframe::ObservationMoment;

use super::frame::{FrameModel, MeanFrame};
use super::observer::Observer;
use super::refraction::Refraction;
use super::types::HorizontalPosition;

/// Azimuth reported at the zenith and nadir, where it is undefined.
pub const UNDEFINED_AZIMUTH_DEG: f64 = 0.0;

const POLE_EPSILON: f64 = 1e-12;

/// Equatorial to horizontal conversion for one observer and moment.
///
/// Azimuth is measured from north, increasing eastward, in [0, 360).
/// The conversion is a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<F = MeanFrame> {
    frame: F,
    refraction: Option<Refraction>,
}

impl Transformer<MeanFrame> {
    pub fn new(precession: bool, refraction: Option<Refraction>) -> Self {
        Self::with_frame(MeanFrame { precession }, refraction)
    }
}

impl<F: FrameModel> Transformer<F> {
    pub fn with_frame(frame: F, refraction: Option<Refraction>) -> Self {
        Self { frame, refraction }
    }

    /// Hour angle in [0, 360) and declination of date, both in degrees.
    fn hour_angle_and_declination(
        &self,
        star: &StarRecord,
        observer: &Observer,
        moment: &ObservationMoment,
    ) -> (f64, f64) {
        let (ra, dec) = self.frame.equatorial_of_date(
            star.right_ascension_deg,
            star.declination_deg,
            moment,
        );
        let lst = self
            .frame
            .local_sidereal_time_deg(moment, observer.longitude_deg());
        (normalize_degrees(lst - ra), dec)
    }

    pub fn transform(
        &self,
        star: &StarRecord,
        observer: &Observer,
        moment: &ObservationMoment,
    ) -> HorizontalPosition {
        let (hour_angle, dec) = self.hour_angle_and_declination(star, observer, moment);
        let position = equatorial_to_horizontal(hour_angle, dec, observer.latitude_deg());
        match self.refraction {
            Some(refraction) if position.is_above_horizon() => HorizontalPosition {
                altitude_deg: refraction.apply(position.altitude_deg),
                ..position
            },
            _ => position,
        }
    }
}

/// Convert hour angle and declination to altitude/azimuth for an observer
/// at `latitude_deg`. All angles in degrees.
///
/// At the zenith and nadir the azimuth is undefined and
/// [`UNDEFINED_AZIMUTH_DEG`] is returned with altitude exactly ±90.
pub fn equatorial_to_horizontal(
    hour_angle_deg: f64,
    declination_deg: f64,
    latitude_deg: f64,
) -> HorizontalPosition {
    let h = hour_angle_deg.to_radians();
    let dec = declination_deg.to_radians();
    let lat = latitude_deg.to_radians();

    // local east/north/up components of the unit direction
    let east = -dec.cos() * h.sin();
    let north = dec.sin() * lat.cos() - dec.cos() * h.cos() * lat.sin();
    let up = lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos();

    let horizontal = east.hypot(north);
    if horizontal < POLE_EPSILON {
        return HorizontalPosition {
            altitude_deg: 90.0_f64.copysign(up),
            azimuth_deg: UNDEFINED_AZIMUTH_DEG,
        };
    }

    HorizontalPosition {
        altitude_deg: up.atan2(horizontal).to_degrees().clamp(-90.0, 90.0),
        azimuth_deg: normalize_degrees(east.atan2(north).to_degrees()),
    }
}
