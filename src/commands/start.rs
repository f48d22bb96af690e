use anyhow::Result;
use colored::Colorize;
use starterkart::{config, server};
use std::path::Path;
use tracing::info;

/// Execute the start command: load configuration, then serve until shutdown
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting Starterkart...".green());

    let cfg = config::load_config(config_path)?;
    info!(config = %config_path.display(), "Configuration loaded");

    server::start_server(cfg).await
}
