//! Julian Date and mean sidereal time.
//!
//! UT1 is approximated by UTC; the difference stays below a second and is
//! invisible at chart resolution.

use chrono::{DateTime, Utc};

use crate::angle::normalize_degrees;

pub const J2000_JD: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

pub fn julian_date(utc: DateTime<Utc>) -> f64 {
    let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich mean sidereal time in degrees, IAU 1982 expression.
pub fn greenwich_mean_sidereal_time_deg(jd: f64) -> f64 {
    let d = jd - J2000_JD;
    let t = julian_centuries(jd);
    let gmst = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(gmst)
}

/// Local mean sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time_deg(utc: DateTime<Utc>, longitude_deg: f64) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_time_deg(julian_date(utc)) + longitude_deg)
}
