//! Angle helpers shared by the time and sky modules.

/// Wrap an angle in degrees to [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs,
    // and keeps the sign of -0.0
    if wrapped >= 360.0 || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Smallest signed difference `a - b` in degrees, in (-180, 180].
#[cfg(test)]
pub fn signed_difference_degrees(a: f64, b: f64) -> f64 {
    let diff = normalize_degrees(a - b);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_into_range() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert!(normalize_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn signed_difference_takes_short_way_round() {
        assert_eq!(signed_difference_degrees(350.0, 10.0), -20.0);
        assert_eq!(signed_difference_degrees(10.0, 350.0), 20.0);
        assert_eq!(signed_difference_degrees(180.0, 0.0), 180.0);
    }
}
