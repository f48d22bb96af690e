use async_trait::async_trait;
use serde::Serialize;
use std::{fmt, sync::Arc};

use super::{defaults, remote::RemoteCatalogSource, Catalog, CatalogError, PlanUpdate};
use crate::config::StoreConfig;

/// Where the catalog in effect comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Builtin,
    Remote,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Supplies and persists catalog data.
///
/// `load` never fails: implementations fall back to the built-in catalog.
/// `update_plan` persists an already-validated edit; the caller mirrors it in
/// memory only when this returns `Ok`.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    fn kind(&self) -> SourceKind;

    async fn load(&self) -> Catalog;

    async fn update_plan(&self, plan_id: &str, update: &PlanUpdate) -> Result<(), CatalogError>;
}

/// Built-in catalog; edits live only in memory for the running process
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalogSource;

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Builtin
    }

    async fn load(&self) -> Catalog {
        defaults::builtin_catalog()
    }

    async fn update_plan(&self, plan_id: &str, _update: &PlanUpdate) -> Result<(), CatalogError> {
        tracing::debug!(plan_id = %plan_id, "No remote store configured, keeping edit in memory");
        Ok(())
    }
}

/// Pick the catalog source once at start-up from configuration presence
pub fn select_source(store: &StoreConfig, client: reqwest::Client) -> Arc<dyn CatalogSource> {
    match store.credentials() {
        Some((url, anon_key)) => {
            tracing::info!(url = %url, "Using remote catalog store");
            Arc::new(RemoteCatalogSource::new(
                client,
                url,
                anon_key,
                store.timeout_seconds,
            ))
        }
        None => {
            tracing::info!("Remote catalog store not configured, using built-in catalog");
            Arc::new(StaticCatalogSource)
        }
    }
}
