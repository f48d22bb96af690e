//! HTTP handlers
//!
//! - health: liveness/readiness probes
//! - catalog: read-only catalog API
//! - quote: quote engine API
//! - admin: staff login and plan editor API
//! - pages: server-rendered site pages
//! - metrics_handler: Prometheus exposition

pub mod admin;
pub mod catalog;
pub mod health;
pub mod metrics_handler;
pub mod pages;
pub mod quote;

use std::sync::Arc;

use crate::{catalog::CatalogStore, config::Config};

/// Shared state for all site and API handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogStore>,
}
