//! Resource types and the route prefix table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_shared::MenuConfig;

// ---------------------------------------------------------------------------
// ResourceType
// ---------------------------------------------------------------------------

/// What kind of page a menu entry links to.
///
/// Unrecognized type names are kept verbatim in [`ResourceType::Other`] so
/// that caller-supplied prefixes can still target them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    Article,
    Blog,
    Catalog,
    Collection,
    Collections,
    Frontpage,
    Http,
    Page,
    Product,
    Search,
    ShopPolicy,
    Other(String),
}

impl ResourceType {
    /// The Storefront API spelling of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Article => "ARTICLE",
            Self::Blog => "BLOG",
            Self::Catalog => "CATALOG",
            Self::Collection => "COLLECTION",
            Self::Collections => "COLLECTIONS",
            Self::Frontpage => "FRONTPAGE",
            Self::Http => "HTTP",
            Self::Page => "PAGE",
            Self::Product => "PRODUCT",
            Self::Search => "SEARCH",
            Self::ShopPolicy => "SHOP_POLICY",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ResourceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ARTICLE" => Self::Article,
            "BLOG" => Self::Blog,
            "CATALOG" => Self::Catalog,
            "COLLECTION" => Self::Collection,
            "COLLECTIONS" => Self::Collections,
            "FRONTPAGE" => Self::Frontpage,
            "HTTP" => Self::Http,
            "PAGE" => Self::Page,
            "PRODUCT" => Self::Product,
            "SEARCH" => Self::Search,
            "SHOP_POLICY" => Self::ShopPolicy,
            _ => Self::Other(s),
        }
    }
}

impl From<ResourceType> for String {
    fn from(t: ResourceType) -> Self {
        t.as_str().to_string()
    }
}

impl FromStr for ResourceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RoutePrefixes
// ---------------------------------------------------------------------------

/// Resource type to URL path segment mapping, resolved once per call.
///
/// Built from the fixed default table, then overlaid key by key with caller
/// overrides. An override to the empty string unregisters the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePrefixes {
    table: HashMap<ResourceType, String>,
}

impl Default for RoutePrefixes {
    fn default() -> Self {
        let table = [
            (ResourceType::Blog, "blogs"),
            (ResourceType::Collection, "collections"),
            (ResourceType::Collections, "collections"),
            (ResourceType::Frontpage, "frontpage"),
            (ResourceType::Http, ""),
            (ResourceType::Page, "pages"),
            (ResourceType::Catalog, "collections/all"),
            (ResourceType::Product, "products"),
            (ResourceType::Search, "search"),
            (ResourceType::ShopPolicy, "policies"),
        ]
        .into_iter()
        .map(|(t, p)| (t, p.to_string()))
        .collect();

        Self { table }
    }
}

impl RoutePrefixes {
    /// Default table overlaid with `overrides`; later entries win.
    pub fn with_overrides<I, P>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (ResourceType, P)>,
        P: Into<String>,
    {
        let mut prefixes = Self::default();
        for (resource_type, prefix) in overrides {
            let prefix = prefix.into();
            debug!(%resource_type, %prefix, "route prefix override");
            prefixes.table.insert(resource_type, prefix);
        }
        prefixes
    }

    /// Build the table from the `[menu.prefixes]` config section.
    pub fn from_config(config: &MenuConfig) -> Self {
        Self::with_overrides(
            config
                .prefixes
                .iter()
                .map(|(k, v)| (ResourceType::from(k.clone()), v.clone())),
        )
    }

    /// The registered prefix for `resource_type`, with surrounding slashes
    /// trimmed. `None` when unregistered or empty.
    pub fn get(&self, resource_type: &ResourceType) -> Option<&str> {
        self.table
            .get(resource_type)
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_parses_known_and_unknown_names() {
        assert_eq!("SHOP_POLICY".parse::<ResourceType>().unwrap(), ResourceType::ShopPolicy);
        assert_eq!(
            "METAOBJECT".parse::<ResourceType>().unwrap(),
            ResourceType::Other("METAOBJECT".into())
        );
    }

    #[test]
    fn resource_type_serde_keeps_unknown_names() {
        let t: ResourceType = serde_json::from_str("\"METAOBJECT\"").expect("deserialize");
        assert_eq!(serde_json::to_string(&t).expect("serialize"), "\"METAOBJECT\"");
        let t: ResourceType = serde_json::from_str("\"PRODUCT\"").expect("deserialize");
        assert_eq!(t, ResourceType::Product);
    }

    #[test]
    fn default_table_matches_storefront_routes() {
        let prefixes = RoutePrefixes::default();
        assert_eq!(prefixes.get(&ResourceType::Product), Some("products"));
        assert_eq!(prefixes.get(&ResourceType::Catalog), Some("collections/all"));
        assert_eq!(prefixes.get(&ResourceType::ShopPolicy), Some("policies"));
        assert_eq!(prefixes.get(&ResourceType::Http), None);
        assert_eq!(prefixes.get(&ResourceType::Article), None);
    }

    #[test]
    fn overrides_replace_whole_values_per_key() {
        let prefixes = RoutePrefixes::with_overrides([
            (ResourceType::Product, "p"),
            (ResourceType::Blog, ""),
        ]);
        assert_eq!(prefixes.get(&ResourceType::Product), Some("p"));
        assert_eq!(prefixes.get(&ResourceType::Blog), None);
        // untouched keys keep their defaults
        assert_eq!(prefixes.get(&ResourceType::Page), Some("pages"));
    }

    #[test]
    fn from_config_reads_type_names() {
        let mut config = MenuConfig::default();
        config.prefixes.insert("COLLECTION".into(), "shop".into());
        config.prefixes.insert("METAOBJECT".into(), "/lookbook/".into());
        let prefixes = RoutePrefixes::from_config(&config);
        assert_eq!(prefixes.get(&ResourceType::Collection), Some("shop"));
        assert_eq!(
            prefixes.get(&ResourceType::Other("METAOBJECT".into())),
            Some("lookbook")
        );
    }
}
