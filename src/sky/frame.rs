//! Sidereal time and precession behind a swappable interface.

use crate::angle::normalize_degrees;
use crate::timeframe::{julian_centuries, local_sidereal_time_deg, ObservationMoment, J2000_JD};

/// Astronomical routines the coordinate transform depends on.
pub trait FrameModel {
    /// Local sidereal time in degrees, [0, 360).
    fn local_sidereal_time_deg(&self, moment: &ObservationMoment, longitude_deg: f64) -> f64;

    /// Refer J2000 catalog coordinates (degrees) to the equator of `moment`.
    fn equatorial_of_date(
        &self,
        ra_deg: f64,
        dec_deg: f64,
        moment: &ObservationMoment,
    ) -> (f64, f64);
}

/// Mean sidereal time (IAU 1982) with optional IAU 1976 precession.
/// Nutation and aberration are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanFrame {
    pub precession: bool,
}

impl Default for MeanFrame {
    fn default() -> Self {
        Self { precession: true }
    }
}

impl FrameModel for MeanFrame {
    fn local_sidereal_time_deg(&self, moment: &ObservationMoment, longitude_deg: f64) -> f64 {
        local_sidereal_time_deg(moment.utc, longitude_deg)
    }

    fn equatorial_of_date(
        &self,
        ra_deg: f64,
        dec_deg: f64,
        moment: &ObservationMoment,
    ) -> (f64, f64) {
        if self.precession {
            precess_from_j2000(ra_deg, dec_deg, moment.julian_date())
        } else {
            (ra_deg, dec_deg)
        }
    }
}

/// Rigorous precession from the J2000 mean equator to the mean equator of
/// `jd` (Meeus, ch. 21, IAU 1976 angles).
pub fn precess_from_j2000(ra_deg: f64, dec_deg: f64, jd: f64) -> (f64, f64) {
    if jd == J2000_JD {
        return (ra_deg, dec_deg);
    }

    let t = julian_centuries(jd);
    let arcsec = |v: f64| (v / 3600.0).to_radians();
    let zeta = arcsec(2306.2181 * t + 0.30188 * t * t + 0.017998 * t * t * t);
    let z = arcsec(2306.2181 * t + 1.09468 * t * t + 0.018203 * t * t * t);
    let theta = arcsec(2004.3109 * t - 0.42665 * t * t - 0.041833 * t * t * t);

    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();

    let a = dec.cos() * (ra + zeta).sin();
    let b = theta.cos() * dec.cos() * (ra + zeta).cos() - theta.sin() * dec.sin();
    let c = theta.sin() * dec.cos() * (ra + zeta).cos() + theta.cos() * dec.sin();

    let ra_date = normalize_degrees((a.atan2(b) + z).to_degrees());
    let dec_date = c.clamp(-1.0, 1.0).asin().to_degrees();
    (ra_date, dec_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    #[test]
    fn precession_matches_reference_example() {
        // Meeus example 21.b, theta Persei to 2028 Nov 13.19
        let (ra, dec) = precess_from_j2000(41.054063, 49.227750, 2_462_088.69);
        assert_abs_diff_eq!(ra, 41.547214, epsilon = 1e-5);
        assert_abs_diff_eq!(dec, 49.348483, epsilon = 1e-5);
    }

    #[test]
    fn precession_is_identity_at_epoch() {
        assert_eq!(precess_from_j2000(123.4, -56.7, J2000_JD), (123.4, -56.7));
    }

    #[test]
    fn disabled_precession_passes_coordinates_through() {
        let moment = ObservationMoment::from_utc(Utc.with_ymd_and_hms(2050, 1, 1, 0, 0, 0).unwrap());
        let frame = MeanFrame { precession: false };
        assert_eq!(frame.equatorial_of_date(10.0, 20.0, &moment), (10.0, 20.0));

        let (ra, dec) = MeanFrame::default().equatorial_of_date(10.0, 20.0, &moment);
        assert!(ra > 10.0 && dec > 20.0);
    }
}
