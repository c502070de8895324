use axum::{extract::State, Json};

use crate::catalog::CatalogSummary;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Loaded catalog summary", body = CatalogSummary)
    )
)]
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogSummary> {
    Json(state.catalog_summary.as_ref().clone())
}
