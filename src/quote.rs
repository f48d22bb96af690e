//! Quote engine
//!
//! A pure function of `(catalog, plan, add-ons)`: no state, no I/O. Add-on
//! eligibility is evaluated on every call, so an add-on picked under one plan
//! silently stops counting when another plan is selected.

use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::catalog::Catalog;

/// Subtotals at or above this amount earn the discount
pub const DISCOUNT_THRESHOLD: u64 = 7999;

/// Discount rate in percent, rounded down to whole rupees
pub const DISCOUNT_PERCENT: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("invalid selection: plan '{plan_id}' {reason}")]
    InvalidSelection { plan_id: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub id: String,
    pub name: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub plan_line: QuoteLine,
    pub add_on_lines: Vec<QuoteLine>,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
    /// Message body for the outbound contact link
    pub summary: String,
}

pub fn quote(
    catalog: &Catalog,
    plan_id: &str,
    add_on_ids: &BTreeSet<String>,
) -> Result<Quote, QuoteError> {
    let plan = catalog
        .plan(plan_id)
        .ok_or_else(|| QuoteError::InvalidSelection {
            plan_id: plan_id.to_string(),
            reason: "does not exist",
        })?;

    if plan.is_custom {
        return Err(QuoteError::InvalidSelection {
            plan_id: plan_id.to_string(),
            reason: "is not offered by the calculator",
        });
    }

    // Catalog order keeps the output deterministic.
    let add_on_lines: Vec<QuoteLine> = catalog
        .add_ons_for(&plan.id)
        .filter(|a| add_on_ids.contains(&a.id))
        .map(|a| QuoteLine {
            id: a.id.clone(),
            name: a.name.clone(),
            price: u64::from(a.price),
        })
        .collect();

    let subtotal = u64::from(plan.price) + add_on_lines.iter().map(|l| l.price).sum::<u64>();
    let discount = discount_for(subtotal);
    let total = subtotal - discount;

    let plan_line = QuoteLine {
        id: plan.id.clone(),
        name: plan.name.clone(),
        price: u64::from(plan.price),
    };
    let summary = summarize(&plan_line, &add_on_lines, total);

    Ok(Quote {
        plan_line,
        add_on_lines,
        subtotal,
        discount,
        total,
        summary,
    })
}

pub fn discount_for(subtotal: u64) -> u64 {
    if subtotal >= DISCOUNT_THRESHOLD {
        subtotal * DISCOUNT_PERCENT / 100
    } else {
        0
    }
}

fn summarize(plan: &QuoteLine, add_ons: &[QuoteLine], total: u64) -> String {
    let mut summary = format!("Hi! I'd like the {} plan", plan.name);
    if !add_ons.is_empty() {
        let names: Vec<&str> = add_ons.iter().map(|l| l.name.as_str()).collect();
        summary.push_str(" with ");
        summary.push_str(&names.join(", "));
    }
    summary.push_str(&format!(". Estimated total: ₹{}", total));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{defaults::builtin_catalog, AddOn, Plan};

    fn ids(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn catalog_with_plan_price(price: u32) -> Catalog {
        let mut catalog = builtin_catalog();
        catalog.plans = vec![Plan {
            price,
            ..catalog.plans[0].clone()
        }];
        catalog
    }

    #[test]
    fn test_discount_boundary() {
        assert_eq!(discount_for(7998), 0);
        assert_eq!(discount_for(7999), 399);
        assert_eq!(discount_for(8498), 424);
        assert_eq!(discount_for(8499), 424);
    }

    #[test]
    fn test_plan_only_below_threshold() {
        let q = quote(&builtin_catalog(), "starter", &BTreeSet::new()).unwrap();
        assert_eq!(q.subtotal, 6999);
        assert_eq!(q.discount, 0);
        assert_eq!(q.total, 6999);
        assert!(q.add_on_lines.is_empty());
    }

    #[test]
    fn test_subtotal_exactly_at_threshold() {
        let q = quote(&catalog_with_plan_price(7999), "starter", &BTreeSet::new()).unwrap();
        assert_eq!(q.discount, 399);
        assert_eq!(q.total, 7600);

        let q = quote(&catalog_with_plan_price(7998), "starter", &BTreeSet::new()).unwrap();
        assert_eq!(q.discount, 0);
        assert_eq!(q.total, 7998);
    }

    #[test]
    fn test_starter_with_allowed_add_on() {
        let q = quote(&builtin_catalog(), "starter", &ids(&["extra-products"])).unwrap();
        assert_eq!(q.subtotal, 8498);
        assert_eq!(q.discount, 424);
        assert_eq!(q.total, 8074);
        assert_eq!(q.add_on_lines.len(), 1);
    }

    #[test]
    fn test_restricted_add_on_ignored_for_other_plan() {
        let q = quote(&builtin_catalog(), "advanced", &ids(&["extra-products"])).unwrap();
        assert_eq!(q.subtotal, 8499);
        assert_eq!(q.discount, 424);
        assert_eq!(q.total, 8075);
        assert!(q.add_on_lines.is_empty());
    }

    #[test]
    fn test_unknown_add_on_is_skipped() {
        let q = quote(&builtin_catalog(), "premium", &ids(&["gift-wrapping"])).unwrap();
        assert_eq!(q.subtotal, 9999);
        assert_eq!(q.total, 9500);
    }

    #[test]
    fn test_custom_plan_is_invalid_selection() {
        let err = quote(&builtin_catalog(), "custom", &BTreeSet::new()).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidSelection { ref plan_id, .. } if plan_id == "custom"));
    }

    #[test]
    fn test_unknown_plan_is_invalid_selection() {
        let err = quote(&builtin_catalog(), "enterprise", &BTreeSet::new()).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidSelection { .. }));
    }

    #[test]
    fn test_add_on_lines_follow_catalog_order() {
        let mut catalog = builtin_catalog();
        catalog.add_ons.push(AddOn {
            id: "a-logo".to_string(),
            name: "Logo Design".to_string(),
            description: String::new(),
            price: 999,
            allowed_for: None,
        });

        let q = quote(&catalog, "starter", &ids(&["a-logo", "extra-products"])).unwrap();
        let names: Vec<&str> = q.add_on_lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Extra 50 Products", "Logo Design"]);
        assert_eq!(q.subtotal, 6999 + 1499 + 999);
    }

    fn catalog_with_open_add_on(price: u32) -> Catalog {
        let mut catalog = builtin_catalog();
        catalog.add_ons.push(AddOn {
            id: "logo".to_string(),
            name: "Logo Design".to_string(),
            description: String::new(),
            price,
            allowed_for: None,
        });
        catalog
    }

    #[test]
    fn test_eligible_add_on_does_not_decrease_total() {
        let catalog = catalog_with_open_add_on(999);
        for plan_id in ["starter", "advanced", "premium"] {
            let without = quote(&catalog, plan_id, &BTreeSet::new()).unwrap();
            let with = quote(&catalog, plan_id, &ids(&["logo"])).unwrap();
            assert!(with.total > without.total, "plan {}", plan_id);
        }

        let without = quote(&catalog, "starter", &BTreeSet::new()).unwrap();
        let with = quote(&catalog, "starter", &ids(&["extra-products"])).unwrap();
        assert!(with.total > without.total);
    }

    #[test]
    fn test_tiny_add_on_crossing_threshold_lowers_total() {
        // The discount applies to the whole subtotal, so a sub-400 add-on that
        // lifts 7998 over the threshold yields a smaller total.
        let mut catalog = catalog_with_open_add_on(1);
        catalog.plans[0].price = 7998;

        let without = quote(&catalog, "starter", &BTreeSet::new()).unwrap();
        let with = quote(&catalog, "starter", &ids(&["logo"])).unwrap();
        assert_eq!(without.total, 7998);
        assert_eq!(with.total, 7600);
    }

    #[test]
    fn test_ineligible_add_on_leaves_total_unchanged() {
        let catalog = builtin_catalog();
        for plan_id in ["advanced", "premium"] {
            let without = quote(&catalog, plan_id, &BTreeSet::new()).unwrap();
            let with = quote(&catalog, plan_id, &ids(&["extra-products"])).unwrap();
            assert_eq!(with, without);
        }
    }

    #[test]
    fn test_summary_mentions_plan_add_ons_and_total() {
        let q = quote(&builtin_catalog(), "starter", &ids(&["extra-products"])).unwrap();
        assert_eq!(
            q.summary,
            "Hi! I'd like the Starter plan with Extra 50 Products. Estimated total: ₹8074"
        );

        let q = quote(&builtin_catalog(), "advanced", &ids(&["extra-products"])).unwrap();
        assert_eq!(q.summary, "Hi! I'd like the Advanced plan. Estimated total: ₹8075");
    }
}
