use utoipa::OpenApi;

use super::api::chart::ChartQuery;
use super::api::error::ErrorResponse;
use crate::catalog::CatalogSummary;
use crate::chart::{
    BelowHorizonPolicy, CardinalLabel, ChartData, ChartGrid, ChartMetadata, ChartPoint,
    GridCircle, GridSpoke, PlanePoint, ProjectionType,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::chart::get_chart,
        super::api::catalog::get_catalog,
    ),
    components(
        schemas(
            ChartData,
            ChartMetadata,
            ChartPoint,
            ChartGrid,
            GridCircle,
            GridSpoke,
            CardinalLabel,
            PlanePoint,
            ProjectionType,
            BelowHorizonPolicy,
            ChartQuery,
            CatalogSummary,
            ErrorResponse,
            crate::catalog::StarRecord,
            crate::sky::Observer,
            crate::timeframe::ObservationMoment,
        )
    ),
    info(
        title = "Star Scope Chart API",
        description = "Planisphere charts of the bright-star catalog for any place and local time",
        version = "0.1.0"
    ),
    tags(
        (name = "chart", description = "Chart computation"),
        (name = "catalog", description = "Loaded star catalog")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_both_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/chart"));
        assert!(doc.paths.paths.contains_key("/api/catalog"));
    }
}
