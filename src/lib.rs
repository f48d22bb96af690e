pub mod auth;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod quote;
pub mod render;
pub mod server;
pub mod signals;
pub mod view;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Level comes from `RUST_LOG` (default: info). A second call is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
