//! Application configuration for the storefront tools.
//!
//! User config lives at `~/.storefront/storefront.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};
use crate::types::Locale;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".storefront";

// ---------------------------------------------------------------------------
// Config structs (matching storefront.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shop domains.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Menu route prefix overrides.
    #[serde(default)]
    pub menu: MenuConfig,

    /// Predictive search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Locale used when the request path carries no known prefix.
    #[serde(default)]
    pub default_locale: Locale,

    /// Prefixed locales (`[[locales]]`).
    #[serde(default = "default_locales")]
    pub locales: Vec<Locale>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shop: ShopConfig::default(),
            menu: MenuConfig::default(),
            search: SearchConfig::default(),
            default_locale: Locale::default(),
            locales: default_locales(),
        }
    }
}

/// `[shop]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Public domain customers browse (e.g. `shop.example.com`).
    #[serde(default)]
    pub primary_domain: String,

    /// `*.myshopify.com` store domain. Falls back to the env var below.
    #[serde(default)]
    pub store_domain: String,

    /// Name of the env var holding the store domain.
    #[serde(default = "default_store_domain_env")]
    pub store_domain_env: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            primary_domain: String::new(),
            store_domain: String::new(),
            store_domain_env: default_store_domain_env(),
        }
    }
}

fn default_store_domain_env() -> String {
    "PUBLIC_STORE_DOMAIN".into()
}

/// `[menu]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Resource type (`PRODUCT`, `BLOG`, ...) to route prefix overrides.
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Route of the full search results page.
    #[serde(default = "default_search_path")]
    pub search_path: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_path: default_search_path(),
        }
    }
}

fn default_search_path() -> String {
    "/search".into()
}

fn default_locales() -> Vec<Locale> {
    vec![
        Locale::new("EN", "CA", "Canada (CAD $)", "CAD").with_prefix("/en-ca"),
        Locale::new("FR", "CA", "Canada (Français) (CAD $)", "CAD").with_prefix("/fr-ca"),
        Locale::new("EN", "GB", "United Kingdom (GBP £)", "GBP").with_prefix("/en-gb"),
        Locale::new("EN", "AU", "Australia (AUD $)", "AUD").with_prefix("/en-au"),
        Locale::new("DE", "DE", "Deutschland (EUR €)", "EUR").with_prefix("/de-de"),
        Locale::new("JA", "JP", "日本 (JPY ¥)", "JPY").with_prefix("/ja-jp"),
    ]
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.storefront/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StorefrontError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.storefront/storefront.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| StorefrontError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        StorefrontError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| StorefrontError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| StorefrontError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| StorefrontError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Resolve the store domain: the config value when set, else the configured env var.
pub fn resolve_store_domain(config: &AppConfig) -> Result<String> {
    if !config.shop.store_domain.is_empty() {
        return Ok(config.shop.store_domain.clone());
    }

    let var_name = &config.shop.store_domain_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(StorefrontError::config(format!(
            "store domain not found. Set `store_domain` under [shop] or the {var_name} \
             environment variable."
        ))),
    }
}
