use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "starterkart",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
///
/// Always ready: the built-in catalog is served until the remote one arrives.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.snapshot();
    (StatusCode::OK, Json(json!({
        "status": "ready",
        "service": "starterkart",
        "catalog_source": state.catalog.source_kind(),
        "plans": catalog.plans.len(),
    })))
}
