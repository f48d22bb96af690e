//! View state for the site
//!
//! Page navigation and calculator selection are immutable values; every user
//! event produces a new [`ViewState`] through [`ViewState::reduce`]. Nothing
//! here is shared or mutated in place.
//!
//! ```text
//! Home ⇄ Portfolio
//!   ↓ Navigate(Login | Editor)
//! Login ──Unlock(true)──▶ Editor ──Logout──▶ Home
//! ```

use serde::Serialize;
use std::collections::BTreeSet;

use crate::{
    catalog::Catalog,
    quote::{quote, Quote, QuoteError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Portfolio,
    Login,
    Editor,
}

/// Calculator selection: one plan plus a set of add-on ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub plan_id: String,
    pub add_on_ids: BTreeSet<String>,
}

impl Selection {
    pub fn for_plan(plan_id: &str) -> Self {
        Self {
            plan_id: plan_id.to_string(),
            add_on_ids: BTreeSet::new(),
        }
    }

    /// The second selectable plan if there is one, else the first
    pub fn default_for(catalog: &Catalog) -> Option<Self> {
        let mut selectable = catalog.selectable_plans();
        let first = selectable.next()?;
        let chosen = selectable.next().unwrap_or(first);
        Some(Self::for_plan(&chosen.id))
    }

    /// Fallback after an inconsistent selection: first selectable plan, no add-ons
    pub fn safe_default(catalog: &Catalog) -> Option<Self> {
        catalog.selectable_plans().next().map(|p| Self::for_plan(&p.id))
    }

    /// Switch plan, keeping add-ons; eligibility is decided at quote time
    pub fn with_plan(&self, plan_id: &str) -> Self {
        Self {
            plan_id: plan_id.to_string(),
            add_on_ids: self.add_on_ids.clone(),
        }
    }

    pub fn toggled(&self, add_on_id: &str) -> Self {
        let mut add_on_ids = self.add_on_ids.clone();
        if !add_on_ids.remove(add_on_id) {
            add_on_ids.insert(add_on_id.to_string());
        }
        Self {
            plan_id: self.plan_id.clone(),
            add_on_ids,
        }
    }

    pub fn quote(&self, catalog: &Catalog) -> Result<Quote, QuoteError> {
        quote(catalog, &self.plan_id, &self.add_on_ids)
    }

    /// Quote the selection, resetting to [`Selection::safe_default`] when it no
    /// longer matches the catalog. `None` only for catalogs without a
    /// selectable plan.
    pub fn quote_or_reset(self, catalog: &Catalog) -> Option<(Selection, Quote)> {
        match self.quote(catalog) {
            Ok(q) => Some((self, q)),
            Err(e) => {
                tracing::warn!(error = %e, "Selection out of sync with catalog, resetting");
                let reset = Self::safe_default(catalog)?;
                let q = reset.quote(catalog).ok()?;
                Some((reset, q))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Page),
    /// Result of an admin gate check
    Unlock(bool),
    Logout,
    SelectPlan(String),
    ToggleAddOn(String),
    CatalogReplaced,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub page: Page,
    pub unlocked: bool,
    pub selection: Option<Selection>,
}

impl ViewState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            page: Page::Home,
            unlocked: false,
            selection: Selection::default_for(catalog),
        }
    }

    pub fn reduce(self, action: Action, catalog: &Catalog) -> Self {
        match action {
            Action::Navigate(Page::Editor) if !self.unlocked => Self {
                page: Page::Login,
                ..self
            },
            Action::Navigate(page) => Self { page, ..self },
            Action::Unlock(true) => Self {
                page: Page::Editor,
                unlocked: true,
                ..self
            },
            Action::Unlock(false) => Self {
                page: Page::Login,
                unlocked: false,
                ..self
            },
            Action::Logout => Self {
                page: Page::Home,
                unlocked: false,
                ..self
            },
            Action::SelectPlan(plan_id) => {
                let selectable = catalog.selectable_plans().any(|p| p.id == plan_id);
                if !selectable {
                    return self;
                }
                let selection = match &self.selection {
                    Some(current) => current.with_plan(&plan_id),
                    None => Selection::for_plan(&plan_id),
                };
                Self {
                    selection: Some(selection),
                    ..self
                }
            }
            Action::ToggleAddOn(add_on_id) => {
                if catalog.add_on(&add_on_id).is_none() {
                    return self;
                }
                let selection = self.selection.as_ref().map(|s| s.toggled(&add_on_id));
                Self { selection, ..self }
            }
            Action::CatalogReplaced => {
                let still_valid = self
                    .selection
                    .as_ref()
                    .is_some_and(|s| catalog.selectable_plans().any(|p| p.id == s.plan_id));
                if still_valid {
                    return self;
                }
                Self {
                    selection: Selection::default_for(catalog),
                    ..self
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults::builtin_catalog;

    #[test]
    fn test_default_selection_is_second_selectable_plan() {
        let catalog = builtin_catalog();
        assert_eq!(Selection::default_for(&catalog).unwrap().plan_id, "advanced");

        let mut single = builtin_catalog();
        single.plans.retain(|p| p.id == "premium" || p.is_custom);
        assert_eq!(Selection::default_for(&single).unwrap().plan_id, "premium");

        let mut only_custom = builtin_catalog();
        only_custom.plans.retain(|p| p.is_custom);
        assert!(Selection::default_for(&only_custom).is_none());
    }

    #[test]
    fn test_add_on_survives_plan_switch_but_only_counts_when_eligible() {
        let catalog = builtin_catalog();
        let state = ViewState::new(&catalog)
            .reduce(Action::SelectPlan("starter".to_string()), &catalog)
            .reduce(Action::ToggleAddOn("extra-products".to_string()), &catalog);
        assert_eq!(state.selection.as_ref().unwrap().quote(&catalog).unwrap().total, 8074);

        let state = state.reduce(Action::SelectPlan("advanced".to_string()), &catalog);
        let selection = state.selection.clone().unwrap();
        assert!(selection.add_on_ids.contains("extra-products"));
        assert_eq!(selection.quote(&catalog).unwrap().total, 8075);

        let state = state.reduce(Action::SelectPlan("starter".to_string()), &catalog);
        assert_eq!(state.selection.unwrap().quote(&catalog).unwrap().total, 8074);
    }

    #[test]
    fn test_custom_plan_cannot_be_selected() {
        let catalog = builtin_catalog();
        let state = ViewState::new(&catalog).reduce(Action::SelectPlan("custom".to_string()), &catalog);
        assert_eq!(state.selection.unwrap().plan_id, "advanced");
    }

    #[test]
    fn test_toggle_twice_clears() {
        let catalog = builtin_catalog();
        let toggle = Action::ToggleAddOn("extra-products".to_string());
        let state = ViewState::new(&catalog)
            .reduce(toggle.clone(), &catalog)
            .reduce(toggle, &catalog);
        assert!(state.selection.unwrap().add_on_ids.is_empty());
    }

    #[test]
    fn test_editor_requires_unlock() {
        let catalog = builtin_catalog();
        let state = ViewState::new(&catalog).reduce(Action::Navigate(Page::Editor), &catalog);
        assert_eq!(state.page, Page::Login);

        let state = state.reduce(Action::Unlock(false), &catalog);
        assert_eq!(state.page, Page::Login);
        assert!(!state.unlocked);

        let state = state.reduce(Action::Unlock(true), &catalog);
        assert_eq!(state.page, Page::Editor);

        let state = state.reduce(Action::Logout, &catalog);
        assert_eq!(state.page, Page::Home);
        assert!(!state.unlocked);
    }

    #[test]
    fn test_catalog_replaced_resets_stale_selection() {
        let catalog = builtin_catalog();
        let state = ViewState::new(&catalog).reduce(Action::SelectPlan("premium".to_string()), &catalog);

        let mut remote = builtin_catalog();
        remote.plans.retain(|p| p.id != "premium");
        let state = state.reduce(Action::CatalogReplaced, &remote);
        assert_eq!(state.selection.unwrap().plan_id, "advanced");
    }

    #[test]
    fn test_quote_or_reset_falls_back_to_first_plan() {
        let catalog = builtin_catalog();
        let (selection, q) = Selection::for_plan("custom").quote_or_reset(&catalog).unwrap();
        assert_eq!(selection.plan_id, "starter");
        assert_eq!(q.total, 6999);
    }
}
