//! Domain types shared by the menu and search crates.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// A storefront locale, optionally bound to a URL path prefix (`/fr-ca`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    /// ISO language code, upper case (`EN`, `FR`).
    pub language: String,
    /// ISO country code, upper case (`US`, `CA`).
    pub country: String,
    /// Human-readable label for locale pickers.
    #[serde(default)]
    pub label: String,
    /// ISO currency code.
    #[serde(default)]
    pub currency: String,
    /// Path prefix including the leading slash, empty for the default locale.
    #[serde(default)]
    pub path_prefix: String,
}

impl Locale {
    /// Create a locale with no path prefix.
    pub fn new(
        language: impl Into<String>,
        country: impl Into<String>,
        label: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
            label: label.into(),
            currency: currency.into(),
            path_prefix: String::new(),
        }
    }

    /// Return a copy bound to the given path prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// Prepend this locale's prefix to an application path.
    ///
    /// Paths that do not start with `/` are returned unchanged.
    pub fn localize(&self, path: &str) -> String {
        if self.path_prefix.is_empty() || !path.starts_with('/') {
            return path.to_string();
        }
        if path == "/" {
            return self.path_prefix.clone();
        }
        format!("{}{path}", self.path_prefix)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("EN", "US", "United States (USD $)", "USD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_has_no_prefix() {
        let locale = Locale::default();
        assert_eq!(locale.country, "US");
        assert_eq!(locale.localize("/products/hat"), "/products/hat");
    }

    #[test]
    fn localize_prefixes_app_paths_only() {
        let locale = Locale::new("FR", "CA", "Canada (Français)", "CAD").with_prefix("/fr-ca");
        assert_eq!(locale.localize("/products/hat"), "/fr-ca/products/hat");
        assert_eq!(locale.localize("/"), "/fr-ca");
        assert_eq!(
            locale.localize("https://example.com/x"),
            "https://example.com/x"
        );
    }

    #[test]
    fn locale_serializes_camel_case() {
        let locale = Locale::default().with_prefix("/en-us");
        let json = serde_json::to_string(&locale).expect("serialize");
        assert!(json.contains("\"pathPrefix\":\"/en-us\""));
    }
}
