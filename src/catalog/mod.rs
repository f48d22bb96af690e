//! Catalog model: plans, add-ons and portfolio entries
//!
//! The catalog is the set of records in effect for the site. It is produced by a
//! [`CatalogSource`] (remote record store or the built-in list) and held by the
//! [`CatalogStore`], which hands out immutable snapshots.

pub mod defaults;
pub mod remote;
pub mod source;
pub mod store;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;

pub use remote::RemoteCatalogSource;
pub use source::{select_source, CatalogSource, SourceKind, StaticCatalogSource};
pub use store::CatalogStore;

/// A fixed-scope service tier with a base price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Whole rupees
    #[serde(deserialize_with = "deserialize_price")]
    pub price: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended: bool,
    /// "Contact us" placeholder; never offered by the calculator
    #[serde(default, alias = "is_custom", deserialize_with = "null_as_default")]
    pub is_custom: bool,
}

/// Optional surcharge item, possibly restricted to specific plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_for: Option<BTreeSet<String>>,
}

impl AddOn {
    /// An absent or empty `allowed_for` allows every plan.
    pub fn is_allowed_for(&self, plan_id: &str) -> bool {
        match &self.allowed_for {
            Some(plan_ids) if !plan_ids.is_empty() => plan_ids.contains(plan_id),
            _ => true,
        }
    }
}

/// A showcase store on the portfolio page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub plans: Vec<Plan>,
    pub add_ons: Vec<AddOn>,
    pub demos: Vec<PortfolioEntry>,
}

impl Catalog {
    pub fn plan(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }

    pub fn add_on(&self, add_on_id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == add_on_id)
    }

    /// Plans the calculator may offer, in catalog order
    pub fn selectable_plans(&self) -> impl Iterator<Item = &Plan> {
        self.plans.iter().filter(|p| !p.is_custom)
    }

    /// Add-ons that may be combined with the given plan, in catalog order
    pub fn add_ons_for<'a>(&'a self, plan_id: &'a str) -> impl Iterator<Item = &'a AddOn> + 'a {
        self.add_ons.iter().filter(move |a| a.is_allowed_for(plan_id))
    }

    /// Returns a copy of the catalog with `update` applied to one plan.
    ///
    /// Fails with [`CatalogError::UnknownPlan`] and leaves `self` untouched when
    /// the plan does not exist.
    pub fn with_plan_update(&self, plan_id: &str, update: &PlanUpdate) -> Result<Catalog, CatalogError> {
        let index = self
            .plans
            .iter()
            .position(|p| p.id == plan_id)
            .ok_or_else(|| CatalogError::UnknownPlan(plan_id.to_string()))?;

        let mut next = self.clone();
        update.apply_to(&mut next.plans[index]);
        Ok(next)
    }
}

/// Editable plan fields. Identity, features and flags are not editable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PlanUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }

    fn apply_to(&self, plan: &mut Plan) {
        if let Some(name) = &self.name {
            plan.name = name.clone();
        }
        if let Some(price) = self.price {
            plan.price = price;
        }
        if let Some(description) = &self.description {
            plan.description = description.clone();
        }
    }
}

/// Plan edit as submitted by the editor, before price coercion
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlanUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<RawPlanUpdate> for PlanUpdate {
    type Error = CatalogError;

    fn try_from(raw: RawPlanUpdate) -> Result<Self, Self::Error> {
        let price = match raw.price {
            None | Some(Value::Null) => None,
            Some(value) => Some(coerce_price(&value)?),
        };

        Ok(PlanUpdate {
            name: raw.name,
            price,
            description: raw.description,
        })
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown plan '{0}'")]
    UnknownPlan(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("remote store request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("remote store returned {status}: {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("remote store updated {0} records, expected exactly one")]
    UnexpectedRowCount(usize),
}

/// Coerces a submitted price into whole rupees.
///
/// Accepts non-negative integers, integral floats, and strings holding either.
pub fn coerce_price(value: &Value) -> Result<u32, CatalogError> {
    let invalid = || CatalogError::InvalidPrice(value.to_string());

    match value {
        Value::Number(n) => {
            if let Some(whole) = n.as_u64() {
                return u32::try_from(whole).map_err(|_| invalid());
            }
            n.as_f64().and_then(integral_price).ok_or_else(invalid)
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(whole) = trimmed.parse::<u64>() {
                return u32::try_from(whole).map_err(|_| invalid());
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(integral_price)
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

fn integral_price(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_price(&value).map_err(serde::de::Error::custom)
}

// Remote rows may carry numeric primary keys.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
