use anyhow::Result;
use colored::Colorize;
use starterkart::config;
use std::path::Path;
use tracing::info;

/// Execute the test command
///
/// This validates the configuration file without starting the server
pub fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Testing configuration...".yellow());
    info!("Loading and validating configuration");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration test successful".green());
    println!();

    println!("{}", "Configuration Summary:".bold());
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    let store = match cfg.store.credentials() {
        Some((url, _)) => format!("remote ({})", url).green().to_string(),
        None => "built-in".yellow().to_string(),
    };
    println!("  {}: {}", "Catalog Store".cyan(), store);
    println!("  {}: {}s", "Store Timeout".cyan(), cfg.store.timeout_seconds);
    println!("  {}: {}", "WhatsApp".cyan(), cfg.contact.whatsapp_number);
    println!("  {}: {}", "Brand".cyan(), cfg.contact.brand);

    info!("Configuration validation completed successfully");
    Ok(())
}
