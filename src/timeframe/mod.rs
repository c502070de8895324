mod error;
mod resolver;
mod sidereal;

pub use error::TimeError;
pub use resolver::{
    parse_local_datetime, parse_utc_offset, resolve, resolve_in, resolve_with_offset,
    ObservationMoment,
};
pub use sidereal::{julian_centuries, julian_date, local_sidereal_time_deg, J2000_JD};
