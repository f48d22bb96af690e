//! HTML pages
//!
//! Each request replays its form or query parameters as [`Action`]s onto a
//! fresh [`ViewState`], then renders the resulting page.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Form,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

use super::AppState;
use crate::{
    auth,
    catalog::{Catalog, PlanUpdate, RawPlanUpdate},
    metrics,
    quote::Quote,
    render,
    view::{Action, Page, Selection, ViewState},
};

/// GET /?plan=<id>&addon=<id>&addon=<id>
///
/// `addon` values form a set. Unknown or stale ids never fail the page: the
/// selection falls back to the first selectable plan.
pub async fn home(State(state): State<AppState>, Query(params): Query<Vec<(String, String)>>) -> Html<String> {
    let catalog = state.catalog.snapshot();

    let mut plan_id = None;
    let mut add_on_ids = BTreeSet::new();
    for (key, value) in params {
        match key.as_str() {
            "plan" => plan_id = Some(value),
            "addon" => {
                add_on_ids.insert(value);
            }
            _ => {}
        }
    }

    let mut view = ViewState::new(&catalog);
    if let Some(plan_id) = plan_id {
        view = view.reduce(Action::SelectPlan(plan_id), &catalog);
    }
    // The default selection has no add-ons, so one toggle per id selects it.
    for add_on_id in add_on_ids {
        view = view.reduce(Action::ToggleAddOn(add_on_id), &catalog);
    }

    let priced = price_selection(view.selection, &catalog);
    Html(render::home_page(&catalog, priced.as_ref(), &state.config.contact))
}

/// Quote the selection for display, counting a reset as an invalid selection
fn price_selection(selection: Option<Selection>, catalog: &Catalog) -> Option<(Selection, Quote)> {
    let requested = selection?;
    let priced = requested.clone().quote_or_reset(catalog);

    let kept = priced.as_ref().is_some_and(|(s, _)| *s == requested);
    metrics::record_quote(if kept { "ok" } else { "invalid_selection" });
    priced
}

/// GET /portfolio
pub async fn portfolio(State(state): State<AppState>) -> Html<String> {
    let catalog = state.catalog.snapshot();
    Html(render::portfolio_page(&catalog, &state.config.contact))
}

/// GET /staff
pub async fn staff_login_form(State(state): State<AppState>) -> Html<String> {
    Html(render::login_page(&state.config.contact, None))
}

#[derive(Debug, Deserialize)]
pub struct UnlockForm {
    #[serde(default)]
    pub password: String,
}

/// POST /staff
pub async fn staff_unlock(
    State(state): State<AppState>,
    Form(form): Form<UnlockForm>,
) -> (StatusCode, Html<String>) {
    let catalog = state.catalog.snapshot();
    let unlocked = auth::unlock(&state.config.admin, &form.password);
    let view = ViewState::new(&catalog)
        .reduce(Action::Navigate(Page::Editor), &catalog)
        .reduce(Action::Unlock(unlocked), &catalog);

    match view.page {
        Page::Editor => (
            StatusCode::OK,
            Html(render::editor_page(&catalog, &state.config.contact, &form.password, None)),
        ),
        _ => {
            tracing::warn!("Rejected staff login");
            (
                StatusCode::UNAUTHORIZED,
                Html(render::login_page(&state.config.contact, Some("Wrong password"))),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlanEditForm {
    #[serde(default)]
    pub password: String,
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
}

impl PlanEditForm {
    /// Blank name or price fields mean "leave unchanged"
    fn into_raw_update(self) -> RawPlanUpdate {
        RawPlanUpdate {
            name: self.name.filter(|n| !n.trim().is_empty()),
            price: self
                .price
                .filter(|p| !p.trim().is_empty())
                .map(Value::String),
            description: self.description,
        }
    }
}

/// POST /staff/plans/:id
pub async fn staff_update_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Form(form): Form<PlanEditForm>,
) -> (StatusCode, Html<String>) {
    if !auth::unlock(&state.config.admin, &form.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Html(render::login_page(&state.config.contact, Some("Wrong password"))),
        );
    }

    let password = form.password.clone();
    let result = match PlanUpdate::try_from(form.into_raw_update()) {
        Ok(update) => state.catalog.update_plan(&plan_id, update).await,
        Err(e) => Err(e),
    };

    let (status, notice) = match result {
        Ok(plan) => (StatusCode::OK, format!("Saved {}", plan.name)),
        Err(e) => (
            crate::error::AppError::from(e).status(),
            "Could not save. Please try again.".to_string(),
        ),
    };

    let catalog = state.catalog.snapshot();
    (
        status,
        Html(render::editor_page(&catalog, &state.config.contact, &password, Some(&notice))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults::builtin_catalog;
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn quote_counts(selection: Selection) -> String {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let catalog = builtin_catalog();
        ::metrics::with_local_recorder(&recorder, || {
            price_selection(Some(selection), &catalog);
        });
        handle.render()
    }

    #[test]
    fn test_reset_selection_counts_as_invalid() {
        let rendered = quote_counts(Selection::for_plan("custom"));
        assert!(rendered.contains("outcome=\"invalid_selection\""));
        assert!(!rendered.contains("outcome=\"ok\""));
    }

    #[test]
    fn test_valid_selection_counts_as_ok() {
        let rendered = quote_counts(Selection::for_plan("starter"));
        assert!(rendered.contains("outcome=\"ok\""));
    }

    #[test]
    fn test_blank_fields_are_left_unchanged() {
        let form = PlanEditForm {
            password: "pw".to_string(),
            name: Some("  ".to_string()),
            price: Some(String::new()),
            description: Some("New copy".to_string()),
        };
        let update = PlanUpdate::try_from(form.into_raw_update()).unwrap();
        assert!(update.name.is_none());
        assert!(update.price.is_none());
        assert_eq!(update.description.as_deref(), Some("New copy"));
    }

    #[test]
    fn test_price_text_is_coerced() {
        let form = PlanEditForm {
            password: "pw".to_string(),
            name: None,
            price: Some("7499".to_string()),
            description: None,
        };
        let update = PlanUpdate::try_from(form.into_raw_update()).unwrap();
        assert_eq!(update.price, Some(7499));
    }
}
