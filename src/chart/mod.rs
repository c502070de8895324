mod builder;
mod error;
mod grid;
mod projection;
mod request;
mod types;

pub use builder::{build_chart, ChartOptions, DEFAULT_LIMITING_MAGNITUDE};
pub use error::ChartError;
pub use request::{compute_chart, ChartRequest};
pub use types::{
    BelowHorizonPolicy, CardinalLabel, ChartData, ChartGrid, ChartMetadata, ChartPoint,
    GridCircle, GridSpoke, PlanePoint, ProjectionType,
};
