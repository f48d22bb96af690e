use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::AppState;
use crate::{
    contact,
    error::AppError,
    metrics,
    quote::{quote, Quote},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub plan_id: String,
    #[serde(default)]
    pub add_on_ids: BTreeSet<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: Quote,
    pub whatsapp_url: String,
}

/// POST /api/quote
///
/// An invalid selection is reported (422), never silently replaced: API
/// clients are expected to offer only ids from the catalog.
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let catalog = state.catalog.snapshot();

    let quote = quote(&catalog, &request.plan_id, &request.add_on_ids).map_err(|e| {
        metrics::record_quote("invalid_selection");
        tracing::warn!(plan_id = %request.plan_id, error = %e, "Rejected quote request");
        e
    })?;
    metrics::record_quote("ok");

    tracing::debug!(
        plan_id = %request.plan_id,
        add_ons = quote.add_on_lines.len(),
        total = quote.total,
        "Quote computed"
    );

    let whatsapp_url = contact::quote_link(&state.config.contact.whatsapp_number, &quote);
    Ok(Json(QuoteResponse { quote, whatsapp_url }))
}
