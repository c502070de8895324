use chrono::{FixedOffset, NaiveDateTime};

use crate::catalog::Catalog;
use crate::locate::{Geocoder, TimezoneLookup};
use crate::sky::Observer;
use crate::timeframe::{self, ObservationMoment};

use super::builder::{build_chart, ChartOptions};
use super::error::ChartError;
use super::types::ChartData;

/// A user's chart request before location and time are resolved.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub location: String,
    pub local_time: NaiveDateTime,
    /// Overrides the timezone lookup when set.
    pub timezone: Option<String>,
    /// Picks a candidate when the local time falls in a daylight-saving fold.
    pub utc_offset: Option<FixedOffset>,
}

impl ChartRequest {
    /// Geocode the location, find its timezone and convert the local time.
    /// Any failure aborts the request.
    pub fn resolve<G, T>(
        &self,
        geocoder: &G,
        zones: &T,
    ) -> Result<(Observer, ObservationMoment), ChartError>
    where
        G: Geocoder + ?Sized,
        T: TimezoneLookup + ?Sized,
    {
        let coordinates = geocoder.geocode(&self.location)?;
        let observer = Observer::new(
            coordinates.latitude_deg,
            coordinates.longitude_deg,
            coordinates.elevation_m,
        )?;

        let moment = match (&self.timezone, self.utc_offset) {
            (Some(id), None) => timeframe::resolve(self.local_time, id)?,
            (Some(id), Some(offset)) => timeframe::resolve_with_offset(self.local_time, id, offset)?,
            (None, offset) => {
                let timezone =
                    zones.timezone_at(observer.latitude_deg(), observer.longitude_deg())?;
                match offset {
                    Some(offset) => {
                        timeframe::resolve_with_offset(self.local_time, timezone.name(), offset)?
                    }
                    None => timeframe::resolve_in(self.local_time, timezone)?,
                }
            }
        };

        log::info!(
            "Resolved {:?} to ({:.4}, {:.4}), {} local = {} UTC",
            self.location,
            observer.latitude_deg(),
            observer.longitude_deg(),
            moment.local().format("%Y-%m-%d %H:%M %Z"),
            moment.utc.format("%Y-%m-%d %H:%M")
        );

        Ok((observer, moment))
    }
}

/// Resolve a request and build its chart.
pub fn compute_chart<G, T>(
    catalog: &Catalog,
    request: &ChartRequest,
    geocoder: &G,
    zones: &T,
    options: &ChartOptions,
) -> Result<ChartData, ChartError>
where
    G: Geocoder + ?Sized,
    T: TimezoneLookup + ?Sized,
{
    let (observer, moment) = request.resolve(geocoder, zones)?;
    Ok(build_chart(catalog, &observer, &moment, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StarRecord;
    use crate::locate::{Gazetteer, LocateError};
    use crate::timeframe::{parse_local_datetime, parse_utc_offset, TimeError};
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    fn request(location: &str, time: &str) -> ChartRequest {
        ChartRequest {
            location: location.to_string(),
            local_time: parse_local_datetime(time).unwrap(),
            timezone: None,
            utc_offset: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![StarRecord {
            id: "Polaris".to_string(),
            right_ascension_deg: 37.9546,
            declination_deg: 89.2641,
            magnitude: 1.98,
        }])
    }

    #[test]
    fn resolves_place_name_and_timezone() {
        let gazetteer = Gazetteer::default();
        let (observer, moment) = request("Boston, MA", "2023-01-01 00:00")
            .resolve(&gazetteer, &gazetteer)
            .unwrap();
        assert_eq!(observer.latitude_deg(), 42.3601);
        assert_eq!(moment.timezone, Tz::America__New_York);
        assert_eq!(moment.utc, Utc.with_ymd_and_hms(2023, 1, 1, 5, 0, 0).unwrap());
    }

    #[test]
    fn polaris_sits_near_observer_latitude() {
        let gazetteer = Gazetteer::default();
        let chart = compute_chart(
            &catalog(),
            &request("Boston", "2023-01-01 00:00"),
            &gazetteer,
            &gazetteer,
            &ChartOptions::default(),
        )
        .unwrap();
        let polaris = &chart.points[0];
        // altitude of the pole equals latitude; Polaris is within a degree
        let r = polaris.x.hypot(polaris.y);
        let altitude = 90.0 - 2.0 * r.atan().to_degrees();
        assert!((altitude - 42.36).abs() < 1.0, "{altitude}");
    }

    #[test]
    fn explicit_timezone_skips_lookup() {
        let gazetteer = Gazetteer::default();
        let mut req = request("0, 0", "2024-03-20 12:00");
        assert!(matches!(
            req.resolve(&gazetteer, &gazetteer),
            Err(ChartError::Locate(LocateError::TimezoneNotFound { .. }))
        ));

        req.timezone = Some("UTC".to_string());
        let (_, moment) = req.resolve(&gazetteer, &gazetteer).unwrap();
        assert_eq!(moment.utc, Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap());

        req.timezone = Some("Mars/Olympus_Mons".to_string());
        assert!(matches!(
            req.resolve(&gazetteer, &gazetteer),
            Err(ChartError::Time(TimeError::UnknownTimezone(_)))
        ));
    }

    #[test]
    fn explicit_timezone_with_offset() {
        let gazetteer = Gazetteer::default();
        let mut req = request("0, 0", "2024-11-03 01:30");
        req.timezone = Some("America/New_York".to_string());
        req.utc_offset = Some(parse_utc_offset("-04:00").unwrap());
        let (_, moment) = req.resolve(&gazetteer, &gazetteer).unwrap();
        assert_eq!(moment.utc, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
        assert_eq!(moment.timezone, Tz::America__New_York);
    }

    #[test]
    fn errors_abort_the_request() {
        let gazetteer = Gazetteer::default();
        let options = ChartOptions::default();

        let missing = compute_chart(&catalog(), &request("Atlantis", "2024-01-01 00:00"), &gazetteer, &gazetteer, &options);
        assert!(matches!(missing, Err(ChartError::Locate(LocateError::AddressNotFound(_)))));

        let gap = compute_chart(&catalog(), &request("New York", "2024-03-10 02:30"), &gazetteer, &gazetteer, &options);
        assert!(matches!(gap, Err(ChartError::Time(TimeError::InvalidLocalTime { .. }))));

        let bad_observer = compute_chart(&catalog(), &request("95, 10", "2024-01-01 00:00"), &gazetteer, &gazetteer, &options);
        assert!(matches!(bad_observer, Err(ChartError::Observer(_))));
    }

    #[test]
    fn utc_offset_resolves_fold() {
        let gazetteer = Gazetteer::default();
        let mut req = request("New York", "2024-11-03 01:30");
        assert!(matches!(
            req.resolve(&gazetteer, &gazetteer),
            Err(ChartError::Time(TimeError::AmbiguousLocalTime { .. }))
        ));

        req.utc_offset = Some(parse_utc_offset("-05:00").unwrap());
        let (_, moment) = req.resolve(&gazetteer, &gazetteer).unwrap();
        assert_eq!(moment.utc, Utc.with_ymd_and_hms(2024, 11, 3, 6, 30, 0).unwrap());
    }
}
