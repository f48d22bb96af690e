//! Staff API: login check, plan editor, catalog refresh
//!
//! `update_plan` and `refresh` sit behind [`crate::auth::admin_gate`].

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::{
    auth,
    catalog::{Plan, PlanUpdate, RawPlanUpdate},
    error::AppError,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    if !auth::unlock(&state.config.admin, &request.password) {
        return Err(AppError::Unauthorized("Wrong password".to_string()));
    }
    Ok(Json(json!({ "unlocked": true })))
}

/// PUT /api/admin/plans/:id
pub async fn update_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Json(raw): Json<RawPlanUpdate>,
) -> Result<Json<Plan>, AppError> {
    let update = PlanUpdate::try_from(raw)?;
    let plan = state.catalog.update_plan(&plan_id, update).await?;
    Ok(Json(plan))
}

/// POST /api/admin/refresh
pub async fn refresh(State(state): State<AppState>) -> Json<Value> {
    let catalog = state.catalog.refresh().await;
    Json(json!({
        "source": state.catalog.source_kind(),
        "plans": catalog.plans.len(),
        "demos": catalog.demos.len(),
    }))
}
