//! Locale lookup from the first path segment of a request.

use std::collections::HashMap;

use tracing::{debug, warn};
use url::Url;

use storefront_shared::{AppConfig, Locale, Result, StorefrontError};

/// Known locales keyed by lowercase path prefix (`/fr-ca`).
#[derive(Debug, Clone)]
pub struct LocaleTable {
    default: Locale,
    by_prefix: HashMap<String, Locale>,
}

impl LocaleTable {
    /// Build a table. Locales without a path prefix are ignored.
    pub fn new(default: Locale, locales: impl IntoIterator<Item = Locale>) -> Self {
        let mut by_prefix = HashMap::new();
        for locale in locales {
            let prefix = normalize_prefix(&locale.path_prefix);
            if prefix.is_empty() {
                warn!(
                    language = %locale.language,
                    country = %locale.country,
                    "locale has no path prefix, ignoring"
                );
                continue;
            }
            by_prefix.insert(prefix.clone(), locale.with_prefix(prefix));
        }
        Self {
            default: Locale {
                path_prefix: String::new(),
                ..default
            },
            by_prefix,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.default_locale.clone(), config.locales.iter().cloned())
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Resolve the locale for an application pathname.
    ///
    /// The first path segment selects a prefixed locale; anything else maps
    /// to the default locale with an empty prefix.
    pub fn resolve(&self, pathname: &str) -> Locale {
        let first = pathname
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        if first.is_empty() {
            return self.default.clone();
        }

        match self.by_prefix.get(&format!("/{first}")) {
            Some(locale) => {
                debug!(prefix = %locale.path_prefix, "locale matched");
                locale.clone()
            }
            None => self.default.clone(),
        }
    }

    /// Resolve the locale for an absolute request URL.
    pub fn resolve_url(&self, url: &str) -> Result<Locale> {
        let parsed = Url::parse(url).map_err(|e| StorefrontError::unparseable_url(url, e))?;
        Ok(self.resolve(parsed.path()))
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/').to_lowercase();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
