//! Shared types, error model, and configuration for the storefront crates.
//!
//! This crate is the foundation depended on by the menu and search crates.
//! It provides:
//! - [`StorefrontError`]: the unified error type
//! - Domain types ([`Locale`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, MenuConfig, SearchConfig, ShopConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, resolve_store_domain,
};
pub use error::{Result, StorefrontError};
pub use types::Locale;
