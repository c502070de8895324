use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("{local} is ambiguous in {timezone} (either {earliest} or {latest}); pass an explicit UTC offset")]
    AmbiguousLocalTime {
        local: NaiveDateTime,
        timezone: String,
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    },
    #[error("{local} does not exist in {timezone} (skipped by a daylight-saving transition)")]
    InvalidLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },
    #[error("{local} in {timezone} never has UTC offset {offset}")]
    OffsetMismatch {
        local: NaiveDateTime,
        timezone: String,
        offset: FixedOffset,
    },
    #[error("parse error: {0}")]
    Parse(String),
}
