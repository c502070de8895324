use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::sky::Observer;
use crate::timeframe::ObservationMoment;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, ValueEnum, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectionType {
    #[default]
    Stereographic,
    Orthographic,
}

/// What happens to stars below the horizon.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, ValueEnum, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BelowHorizonPolicy {
    #[default]
    Exclude,
    IncludeFlagged,
}

/// One star on the chart plane. `+y` points north, `+x` east.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub magnitude: f64,
    pub below_horizon: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CardinalLabel {
    pub label: String,
    pub azimuth_deg: f64,
    pub position: PlanePoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GridCircle {
    pub altitude_deg: f64,
    pub radius: f64,
    pub label: String,
    pub label_position: PlanePoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GridSpoke {
    pub azimuth_deg: f64,
    pub end: PlanePoint,
    pub label: String,
    pub label_position: PlanePoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartGrid {
    pub altitude_circles: Vec<GridCircle>,
    pub azimuth_spokes: Vec<GridSpoke>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartMetadata {
    pub radius: f64,
    pub center: PlanePoint,
    pub projection_type: ProjectionType,
    pub below_horizon_policy: BelowHorizonPolicy,
    pub refraction_correction: bool,
    pub precession: bool,
    pub limiting_magnitude: f64,
    pub observer: Observer,
    pub moment: ObservationMoment,
    pub local_sidereal_time_deg: f64,
    pub cardinals: Vec<CardinalLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<ChartGrid>,
    /// Stars at or above the horizon.
    pub visible_count: usize,
    /// Stars below the horizon, charted or not depending on the policy.
    pub below_horizon_count: usize,
    /// Stars left off the chart for being fainter than the limit.
    pub fainter_than_limit_count: usize,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartData {
    pub metadata: ChartMetadata,
    /// Faintest first, so brighter stars draw on top.
    pub points: Vec<ChartPoint>,
}
