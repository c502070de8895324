use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::Serialize;
use utoipa::ToSchema;

use super::error::TimeError;
use super::sidereal::julian_date;

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// A resolved instant of observation together with the zone it was
/// entered in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ObservationMoment {
    pub utc: DateTime<Utc>,
    #[schema(value_type = String, example = "America/New_York")]
    pub timezone: Tz,
}

impl ObservationMoment {
    pub fn new(utc: DateTime<Utc>, timezone: Tz) -> Self {
        Self { utc, timezone }
    }

    #[cfg(test)]
    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        Self::new(utc, Tz::UTC)
    }

    pub fn local(&self) -> DateTime<Tz> {
        self.utc.with_timezone(&self.timezone)
    }

    pub fn julian_date(&self) -> f64 {
        julian_date(self.utc)
    }
}

pub fn parse_timezone(id: &str) -> Result<Tz, TimeError> {
    id.trim()
        .parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(id.to_string()))
}

/// Resolve a wall-clock time in the named IANA zone to a UTC instant.
///
/// Times inside a daylight-saving fold fail with `AmbiguousLocalTime`;
/// times skipped by a spring-forward gap fail with `InvalidLocalTime`.
pub fn resolve(local: NaiveDateTime, timezone_id: &str) -> Result<ObservationMoment, TimeError> {
    resolve_in(local, parse_timezone(timezone_id)?)
}

pub fn resolve_in(local: NaiveDateTime, timezone: Tz) -> Result<ObservationMoment, TimeError> {
    match timezone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(ObservationMoment::new(dt.with_timezone(&Utc), timezone)),
        LocalResult::Ambiguous(earliest, latest) => Err(TimeError::AmbiguousLocalTime {
            local,
            timezone: timezone.name().to_string(),
            earliest: earliest.with_timezone(&Utc),
            latest: latest.with_timezone(&Utc),
        }),
        LocalResult::None => Err(TimeError::InvalidLocalTime {
            local,
            timezone: timezone.name().to_string(),
        }),
    }
}

/// Resolve a wall-clock time using a caller-chosen UTC offset to pick
/// between the candidates of a daylight-saving fold.
pub fn resolve_with_offset(
    local: NaiveDateTime,
    timezone_id: &str,
    offset: FixedOffset,
) -> Result<ObservationMoment, TimeError> {
    let timezone = parse_timezone(timezone_id)?;
    let candidates = match timezone.from_local_datetime(&local) {
        LocalResult::Single(dt) => vec![dt],
        LocalResult::Ambiguous(earliest, latest) => vec![earliest, latest],
        LocalResult::None => {
            return Err(TimeError::InvalidLocalTime {
                local,
                timezone: timezone.name().to_string(),
            })
        }
    };

    candidates
        .into_iter()
        .find(|dt| dt.offset().fix() == offset)
        .map(|dt| ObservationMoment::new(dt.with_timezone(&Utc), timezone))
        .ok_or_else(|| TimeError::OffsetMismatch {
            local,
            timezone: timezone.name().to_string(),
            offset,
        })
}

/// Parse a local wall-clock time such as `2023-01-01 00:00`.
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, TimeError> {
    let s = s.trim();
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            TimeError::Parse(format!("invalid date/time {:?}, expected YYYY-MM-DD HH:MM", s))
        })
}

/// Parse a UTC offset such as `+01:00`, `-0500`, `+5` or `Z`.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset, TimeError> {
    let t = s.trim();
    let err = || TimeError::Parse(format!("invalid UTC offset: {:?}", t));

    if t.eq_ignore_ascii_case("z") || t.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = if let Some(rest) = t.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = t.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(err());
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().map_err(|_| err())?;
    let minutes: i32 = minutes.parse().map_err(|_| err())?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(err());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(err)
}
