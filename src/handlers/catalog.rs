use axum::{extract::State, Json};
use serde::Serialize;

use super::AppState;
use crate::catalog::{Catalog, Plan, PortfolioEntry, SourceKind};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub source: SourceKind,
    #[serde(flatten)]
    pub catalog: Catalog,
}

/// GET /api/catalog
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        source: state.catalog.source_kind(),
        catalog: Catalog::clone(&state.catalog.snapshot()),
    })
}

/// GET /api/plans
pub async fn list_plans(State(state): State<AppState>) -> Json<Vec<Plan>> {
    Json(state.catalog.snapshot().plans.clone())
}

/// GET /api/portfolio
pub async fn list_portfolio(State(state): State<AppState>) -> Json<Vec<PortfolioEntry>> {
    Json(state.catalog.snapshot().demos.clone())
}
