use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variables the site was originally deployed with
const LEGACY_URL_VARS: [&str; 2] = ["SUPABASE_URL", "VITE_SUPABASE_URL"];
const LEGACY_KEY_VARS: [&str; 2] = ["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Remote record store (Supabase). Both `url` and `anon_key` must be present
/// for the remote store to be used at all.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Per-request timeout for fetches and updates (default: 10)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl StoreConfig {
    /// `(url, anon_key)` when both are set and non-blank
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self.anon_key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((url, key))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// Fill missing fields from the legacy `SUPABASE_*` / `VITE_SUPABASE_*` variables
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |names: &[&str]| names.iter().find_map(|name| lookup(name));

        if self.url.is_none() {
            self.url = first_set(&LEGACY_URL_VARS);
        }
        if self.anon_key.is_none() {
            self.anon_key = first_set(&LEGACY_KEY_VARS);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactConfig {
    /// International format, digits only (default: 919818082449)
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
    #[serde(default = "default_brand")]
    pub brand: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: default_whatsapp_number(),
            brand: default_brand(),
        }
    }
}

/// Staff screen-lock. Plaintext; not an authentication system.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_admin_password(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_whatsapp_number() -> String {
    "919818082449".to_string()
}

fn default_brand() -> String {
    "Starterkart".to_string()
}

fn default_admin_password() -> String {
    "dawar123".to_string()
}

/// Load configuration from an optional TOML file, then `STARTERKART__*`
/// environment variables, then the legacy Supabase variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("STARTERKART").separator("__"))
        .build()?;

    let mut cfg: Config = config.try_deserialize()?;
    cfg.store.apply_legacy_env(|name| std::env::var(name).ok());
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("server.port must be non-zero");
    }

    if cfg.store.timeout_seconds == 0 {
        anyhow::bail!("store.timeout_seconds must be at least 1");
    }

    if let Some((url, _)) = cfg.store.credentials() {
        let parsed = url::Url::parse(url)
            .map_err(|e| anyhow::anyhow!("store.url '{}' is not a valid URL: {}", url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("store.url '{}' must use http or https", url);
        }
    }

    let number = cfg.contact.whatsapp_number.trim_start_matches('+');
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!(
            "contact.whatsapp_number '{}' must contain only digits",
            cfg.contact.whatsapp_number
        );
    }

    if cfg.admin.password.is_empty() {
        anyhow::bail!("admin.password cannot be empty");
    }

    Ok(())
}
