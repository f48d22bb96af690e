use anyhow::Result;
use colored::Colorize;
use starterkart::{
    config::{self, Config},
    logging::mask_secret,
};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Mask the store key and staff password for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.store.anon_key = mask_secret(cfg.store.anon_key.as_deref());
    sanitized.admin.password = "***".to_string();
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_secrets() {
        let mut cfg = Config::default();
        cfg.store.anon_key = Some("eyJhbGciOiJIUzI1NiJ9.secret".to_string());

        let sanitized = sanitize_secrets(&cfg);
        assert_eq!(sanitized.store.anon_key.as_deref(), Some("eyJhbGci***"));
        assert_eq!(sanitized.admin.password, "***");

        let rendered = toml::to_string_pretty(&sanitized).unwrap();
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("dawar123"));
    }
}
