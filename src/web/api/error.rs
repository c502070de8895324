use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

use crate::chart::ChartError;
use crate::locate::LocateError;
use crate::timeframe::TimeError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(&'static str, String),
    Unprocessable(&'static str, String),
}

impl From<TimeError> for ApiError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::AmbiguousLocalTime { .. } => {
                ApiError::Unprocessable("ambiguous_local_time", e.to_string())
            }
            TimeError::InvalidLocalTime { .. } => {
                ApiError::Unprocessable("invalid_local_time", e.to_string())
            }
            TimeError::OffsetMismatch { .. } => {
                ApiError::Unprocessable("offset_mismatch", e.to_string())
            }
            TimeError::UnknownTimezone(_) | TimeError::Parse(_) => {
                ApiError::Validation(e.to_string())
            }
        }
    }
}

impl From<LocateError> for ApiError {
    fn from(e: LocateError) -> Self {
        match e {
            LocateError::AddressNotFound(_) => ApiError::NotFound("address_not_found", e.to_string()),
            LocateError::TimezoneNotFound { .. } => {
                ApiError::NotFound("timezone_not_found", e.to_string())
            }
        }
    }
}

impl From<ChartError> for ApiError {
    fn from(e: ChartError) -> Self {
        match e {
            ChartError::Locate(e) => e.into(),
            ChartError::Time(e) => e.into(),
            ChartError::Observer(e) => ApiError::Validation(e.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// `Query` whose rejection is an `ApiError`, so malformed parameters get a JSON body.
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::NotFound(reason, msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message(reason, &msg)),
            )
                .into_response(),
            ApiError::Unprocessable(reason, msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_message(reason, &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn status(e: impl Into<ApiError>) -> StatusCode {
        e.into().into_response().status()
    }

    #[test]
    fn maps_failures_to_status_codes() {
        let local = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();

        assert_eq!(
            status(ChartError::Locate(LocateError::AddressNotFound("Atlantis".into()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(LocateError::TimezoneNotFound {
                latitude_deg: 0.0,
                longitude_deg: -140.0
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(TimeError::InvalidLocalTime {
                local,
                timezone: "America/New_York".into()
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(TimeError::UnknownTimezone("Mars/Olympus".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ApiError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
