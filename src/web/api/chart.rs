use axum::{extract::State, Json};
use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::chart::{compute_chart, BelowHorizonPolicy, ChartData, ChartRequest, ProjectionType};
use crate::config::ChartOverrides;
use crate::timeframe::{parse_local_datetime, parse_utc_offset};
use crate::web::api::error::{ApiQuery, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChartQuery {
    pub location: String,
    #[serde(deserialize_with = "deserialize_local_time")]
    #[schema(value_type = String)]
    pub time: NaiveDateTime,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub utc_offset: Option<String>,
    #[serde(default)]
    pub projection: Option<ProjectionType>,
    #[serde(default)]
    pub below_horizon: Option<BelowHorizonPolicy>,
    #[serde(default)]
    pub refraction: Option<bool>,
    #[serde(default)]
    pub grid: Option<bool>,
}

impl ChartQuery {
    fn overrides(&self) -> ChartOverrides {
        ChartOverrides {
            projection: self.projection,
            below_horizon: self.below_horizon,
            refraction: self.refraction,
            grid: self.grid,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/chart",
    tag = "chart",
    params(
        ("location" = String, Query, description = "Place name or \"lat, lon\""),
        ("time" = String, Query, description = "Local wall-clock time, e.g. 2024-03-20T21:00"),
        ("timezone" = Option<String>, Query, description = "IANA timezone; looked up from the location when absent"),
        ("utc_offset" = Option<String>, Query, description = "UTC offset such as -04:00, used to pick a side of a daylight-saving fold"),
        ("projection" = Option<ProjectionType>, Query, description = "stereographic or orthographic"),
        ("below_horizon" = Option<BelowHorizonPolicy>, Query, description = "exclude or include-flagged"),
        ("refraction" = Option<bool>, Query, description = "Apply atmospheric refraction"),
        ("grid" = Option<bool>, Query, description = "Include altitude circles and azimuth spokes")
    ),
    responses(
        (status = 200, description = "Projected chart", body = ChartData),
        (status = 400, description = "Malformed parameters", body = super::error::ErrorResponse),
        (status = 404, description = "Address or timezone not found", body = super::error::ErrorResponse),
        (status = 422, description = "Local time is ambiguous or does not exist", body = super::error::ErrorResponse)
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ChartQuery>,
) -> ApiResult<Json<ChartData>> {
    let utc_offset = query.utc_offset.as_deref().map(parse_utc_offset).transpose()?;
    let request = ChartRequest {
        location: query.location.clone(),
        local_time: query.time,
        timezone: query.timezone.clone(),
        utc_offset,
    };
    let options = state.config.chart_options_with(&query.overrides());

    let gazetteer = state.gazetteer.as_ref();
    let chart = compute_chart(&state.catalog, &request, gazetteer, gazetteer, &options)?;
    Ok(Json(chart))
}

fn deserialize_local_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_local_datetime(&s).map_err(serde::de::Error::custom)
}
