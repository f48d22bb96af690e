use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::{defaults, Catalog, CatalogError, CatalogSource, Plan, PlanUpdate, SourceKind};
use crate::metrics;

/// The catalog currently in effect.
///
/// Starts with the built-in catalog so the site renders immediately; a refresh
/// swaps in whatever the source loads. Readers get cheap immutable snapshots.
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    current: ArcSwap<Catalog>,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            current: ArcSwap::from_pointee(defaults::builtin_catalog()),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.load_full()
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// Load from the source and make the result current.
    ///
    /// With the built-in source this is a no-op: edits made in this process
    /// exist only in memory and a reload would discard them.
    pub async fn refresh(&self) -> Arc<Catalog> {
        if self.source.kind() == SourceKind::Builtin {
            tracing::info!("No remote store configured, keeping in-memory catalog");
            return self.snapshot();
        }

        let catalog = Arc::new(self.source.load().await);
        self.current.store(catalog.clone());

        tracing::info!(
            source = %self.source.kind(),
            plans = catalog.plans.len(),
            demos = catalog.demos.len(),
            "Catalog refreshed"
        );
        catalog
    }

    /// Fire-and-forget refresh; the built-in catalog stays in effect until it lands
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            store.refresh().await;
        })
    }

    /// Validate, persist, then mirror a plan edit.
    ///
    /// Unknown plans and failed remote writes leave the in-memory catalog as it was.
    pub async fn update_plan(&self, plan_id: &str, update: PlanUpdate) -> Result<Plan, CatalogError> {
        let result = self.apply_update(plan_id, &update).await;
        metrics::record_plan_update(if result.is_ok() { "success" } else { "failure" });

        if let Err(e) = &result {
            tracing::warn!(plan_id = %plan_id, error = %e, "Plan update rejected");
        }
        result
    }

    async fn apply_update(&self, plan_id: &str, update: &PlanUpdate) -> Result<Plan, CatalogError> {
        let validated = self.snapshot().with_plan_update(plan_id, update)?;
        if update.is_empty() {
            return validated
                .plan(plan_id)
                .cloned()
                .ok_or_else(|| CatalogError::UnknownPlan(plan_id.to_string()));
        }

        self.source.update_plan(plan_id, update).await?;

        // Mirror onto the latest snapshot in case a refresh landed meanwhile.
        let mut mirrored: Option<Plan> = None;
        self.current.rcu(|latest| match latest.with_plan_update(plan_id, update) {
            Ok(next) => {
                mirrored = next.plan(plan_id).cloned();
                Arc::new(next)
            }
            Err(_) => {
                mirrored = None;
                Arc::clone(latest)
            }
        });

        tracing::info!(plan_id = %plan_id, source = %self.source.kind(), "Plan updated");
        if let Some(plan) = mirrored {
            return Ok(plan);
        }

        // Persisted, but a concurrent refresh dropped the plan from memory.
        tracing::warn!(plan_id = %plan_id, "Plan persisted but missing from the refreshed catalog");
        validated
            .plan(plan_id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownPlan(plan_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalogSource;
    use async_trait::async_trait;

    /// Source whose writes always fail
    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Remote
        }

        async fn load(&self) -> Catalog {
            defaults::builtin_catalog()
        }

        async fn update_plan(&self, _plan_id: &str, _update: &PlanUpdate) -> Result<(), CatalogError> {
            Err(CatalogError::RemoteStatus {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    /// Source that serves a single remote plan
    struct OnePlanSource;

    #[async_trait]
    impl CatalogSource for OnePlanSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Remote
        }

        async fn load(&self) -> Catalog {
            let mut catalog = defaults::builtin_catalog();
            catalog.plans.truncate(1);
            catalog.plans[0].price = 5000;
            catalog
        }

        async fn update_plan(&self, _plan_id: &str, _update: &PlanUpdate) -> Result<(), CatalogError> {
            Ok(())
        }
    }

    /// Remote source whose write lands while a refresh drops every plan but `starter`
    #[derive(Default)]
    struct RacingSource {
        store: std::sync::OnceLock<std::sync::Weak<CatalogStore>>,
    }

    #[async_trait]
    impl CatalogSource for RacingSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Remote
        }

        async fn load(&self) -> Catalog {
            let mut catalog = defaults::builtin_catalog();
            catalog.plans.retain(|p| p.id == "starter");
            catalog
        }

        async fn update_plan(&self, _plan_id: &str, _update: &PlanUpdate) -> Result<(), CatalogError> {
            if let Some(store) = self.store.get().and_then(|w| w.upgrade()) {
                store.refresh().await;
            }
            Ok(())
        }
    }

    fn price_update(price: u32) -> PlanUpdate {
        PlanUpdate {
            price: Some(price),
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_with_builtin_catalog() {
        let store = CatalogStore::new(Arc::new(OnePlanSource));
        assert_eq!(*store.snapshot(), defaults::builtin_catalog());
    }

    #[tokio::test]
    async fn test_refresh_swaps_in_loaded_catalog() {
        let store = CatalogStore::new(Arc::new(OnePlanSource));
        store.refresh().await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.plans.len(), 1);
        assert_eq!(snapshot.plans[0].price, 5000);
    }

    #[tokio::test]
    async fn test_update_in_memory_without_remote() {
        let store = CatalogStore::new(Arc::new(StaticCatalogSource));
        let plan = store.update_plan("starter", price_update(7499)).await.unwrap();

        assert_eq!(plan.price, 7499);
        assert_eq!(store.snapshot().plan("starter").unwrap().price, 7499);
    }

    #[tokio::test]
    async fn test_update_unknown_plan_does_not_mutate() {
        let store = CatalogStore::new(Arc::new(StaticCatalogSource));
        let before = store.snapshot();

        let result = store.update_plan("enterprise", price_update(1)).await;
        assert!(matches!(result, Err(CatalogError::UnknownPlan(_))));
        assert_eq!(*store.snapshot(), *before);
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_memory_unchanged() {
        let store = CatalogStore::new(Arc::new(FailingSource));
        let before = store.snapshot();

        let result = store.update_plan("starter", price_update(1)).await;
        assert!(matches!(result, Err(CatalogError::RemoteStatus { status: 503, .. })));
        assert_eq!(*store.snapshot(), *before);
    }

    #[tokio::test]
    async fn test_empty_update_is_a_no_op() {
        let store = CatalogStore::new(Arc::new(FailingSource));
        let plan = store.update_plan("premium", PlanUpdate::default()).await.unwrap();
        assert_eq!(plan.price, 9999);
    }

    #[tokio::test]
    async fn test_refresh_keeps_edits_without_remote() {
        let store = CatalogStore::new(Arc::new(StaticCatalogSource));
        store.update_plan("starter", price_update(7499)).await.unwrap();

        let refreshed = store.refresh().await;
        assert_eq!(refreshed.plan("starter").unwrap().price, 7499);
        assert_eq!(store.snapshot().plan("starter").unwrap().price, 7499);
    }

    #[tokio::test]
    async fn test_persisted_update_survives_concurrent_refresh() {
        let source = Arc::new(RacingSource::default());
        let store = Arc::new(CatalogStore::new(source.clone()));
        let _ = source.store.set(Arc::downgrade(&store));

        let plan = store.update_plan("premium", price_update(10999)).await.unwrap();
        assert_eq!(plan.id, "premium");
        assert_eq!(plan.price, 10999);
        assert!(store.snapshot().plan("premium").is_none());
    }

    #[tokio::test]
    async fn test_spawn_refresh() {
        let store = Arc::new(CatalogStore::new(Arc::new(OnePlanSource)));
        store.spawn_refresh().await.unwrap();
        assert_eq!(store.snapshot().plans.len(), 1);
    }
}
