use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    auth,
    catalog::{select_source, CatalogStore},
    config::Config,
    handlers::{self, AppState},
    logging::mask_secret,
    metrics,
    signals::setup_signal_handlers,
};

/// Start the site server
///
/// This function:
/// 1. Initializes metrics
/// 2. Picks the catalog source and starts the initial refresh in the background
/// 3. Sets up signal handlers for graceful shutdown and catalog refresh
/// 4. Binds to the configured address and serves until shutdown
pub async fn start_server(config: Config) -> Result<()> {
    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics()?);

    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.store.timeout_seconds))
        .build()
        .context("Failed to build HTTP client")?;

    let source = select_source(&config.store, http_client);
    let catalog = Arc::new(CatalogStore::new(source));
    info!(
        source = %catalog.source_kind(),
        store_url = config.store.url.as_deref().unwrap_or("-"),
        anon_key = mask_secret(config.store.anon_key.as_deref()).as_deref().unwrap_or("-"),
        "Catalog source selected"
    );

    // Serve the built-in catalog until the first load lands.
    catalog.spawn_refresh();

    let (shutdown_tx, signal_handle) = setup_signal_handlers(catalog.clone())?;
    let mut shutdown_rx = shutdown_tx.subscribe();

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .with_context(|| format!("Invalid server host '{}'", config.server.host))?,
        config.server.port,
    ));

    let state = AppState {
        config: Arc::new(config),
        catalog,
    };
    let app = create_router(state, Some(metrics_handle));

    info!("Starting Starterkart on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
///
/// `metrics` is optional so tests can build the router without installing the
/// global recorder.
pub fn create_router(state: AppState, metrics: Option<Arc<PrometheusHandle>>) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin/plans/:id", put(handlers::admin::update_plan))
        .route("/api/admin/refresh", post(handlers::admin::refresh))
        .layer(middleware::from_fn_with_state(state.clone(), auth::admin_gate));

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // JSON API
        .route("/api/catalog", get(handlers::catalog::get_catalog))
        .route("/api/plans", get(handlers::catalog::list_plans))
        .route("/api/portfolio", get(handlers::catalog::list_portfolio))
        .route("/api/quote", post(handlers::quote::create_quote))
        .route("/api/admin/login", post(handlers::admin::login))
        .merge(admin_routes)
        // Site pages
        .route("/", get(handlers::pages::home))
        .route("/portfolio", get(handlers::pages::portfolio))
        .route(
            "/staff",
            get(handlers::pages::staff_login_form).post(handlers::pages::staff_unlock),
        )
        .route("/staff/plans/:id", post(handlers::pages::staff_update_plan))
        .with_state(state);

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(handlers::metrics_handler::metrics))
                .with_state(handle),
        );
    }

    router
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
