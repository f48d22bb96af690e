//! Supabase (PostgREST) backed catalog source
//!
//! Reads `plans` (ordered by ascending price) and `demos`, and patches plans
//! by id. Every call is a single attempt bounded by the configured timeout.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{
    defaults, source::SourceKind, Catalog, CatalogError, CatalogSource, Plan, PlanUpdate,
    PortfolioEntry,
};
use crate::{logging::SensitiveKey, metrics};

const PLANS: &str = "plans";
const DEMOS: &str = "demos";

pub struct RemoteCatalogSource {
    client: Client,
    base_url: String,
    anon_key: String,
    timeout: Duration,
}

impl RemoteCatalogSource {
    pub fn new(client: Client, base_url: &str, anon_key: &str, timeout_seconds: u64) -> Self {
        tracing::debug!(
            base_url = %base_url,
            anon_key = %SensitiveKey::new(anon_key),
            timeout_seconds,
            "Remote catalog source created"
        );

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .timeout(self.timeout)
    }

    pub async fn fetch_plans(&self) -> Result<Vec<Plan>, CatalogError> {
        self.select(PLANS, &[("select", "*"), ("order", "price.asc")]).await
    }

    pub async fn fetch_demos(&self) -> Result<Vec<PortfolioEntry>, CatalogError> {
        self.select(DEMOS, &[("select", "*")]).await
    }

    async fn select<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, CatalogError> {
        let response = self
            .authorized(self.client.get(self.collection_url(collection)))
            .query(query)
            .send()
            .await?;

        let rows = ensure_success(response).await?.json::<Vec<T>>().await?;
        Ok(rows)
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalogSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    async fn load(&self) -> Catalog {
        let (plans, demos) = tokio::join!(self.fetch_plans(), self.fetch_demos());
        let mut catalog = defaults::builtin_catalog();

        if let Some(plans) = take_non_empty(PLANS, plans) {
            catalog.plans = plans;
        }
        if let Some(demos) = take_non_empty(DEMOS, demos) {
            catalog.demos = demos;
        }

        catalog
    }

    async fn update_plan(&self, plan_id: &str, update: &PlanUpdate) -> Result<(), CatalogError> {
        let response = self
            .authorized(self.client.patch(self.collection_url(PLANS)))
            .query(&[("id", format!("eq.{}", plan_id))])
            .header("Prefer", "return=representation")
            .json(update)
            .send()
            .await?;

        let rows = ensure_success(response)
            .await?
            .json::<Vec<serde_json::Value>>()
            .await?;

        if rows.len() != 1 {
            return Err(CatalogError::UnexpectedRowCount(rows.len()));
        }

        tracing::info!(plan_id = %plan_id, "Plan persisted to remote store");
        Ok(())
    }
}

/// Keeps a fetched collection only when it succeeded with at least one row
fn take_non_empty<T>(collection: &str, fetched: Result<Vec<T>, CatalogError>) -> Option<Vec<T>> {
    match fetched {
        Ok(rows) if !rows.is_empty() => {
            tracing::info!(collection, rows = rows.len(), "Loaded collection from remote store");
            metrics::record_catalog_fetch(collection, "loaded");
            Some(rows)
        }
        Ok(_) => {
            tracing::info!(collection, "Remote collection is empty, keeping built-in records");
            metrics::record_catalog_fetch(collection, "empty");
            None
        }
        Err(e) => {
            tracing::warn!(collection, error = %e, "Remote fetch failed, keeping built-in records");
            metrics::record_catalog_fetch(collection, "error");
            None
        }
    }
}

async fn ensure_success(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(CatalogError::RemoteStatus {
        status: status.as_u16(),
        message,
    })
}
