use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::catalog as catalog_handlers;
use super::api::chart as chart_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chart", get(chart_handlers::get_chart))
        .route("/api/catalog", get(catalog_handlers::get_catalog))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState) -> std::io::Result<()> {
    let bind_addr = state.config.web.bind.clone();
    log::info!(
        "Serving {} stars from {} on {}",
        state.catalog.len(),
        state.catalog_summary.source,
        bind_addr
    );
    log::info!(
        "Gazetteer has {} places, timezone lookups within {} km",
        state.gazetteer.places().len(),
        state.config.gazetteer.max_timezone_distance_km
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await
}
