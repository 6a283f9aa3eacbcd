//! Item path resolution and internal/external link classification.

use serde::{Deserialize, Serialize};
use url::Url;

use storefront_shared::{Result, StorefrontError};

use crate::resource::{ResourceType, RoutePrefixes};
use crate::tree::MenuItem;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Browsing context for a rendered link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkTarget {
    #[serde(rename = "_self")]
    SameTab,
    #[serde(rename = "_blank")]
    NewTab,
}

/// Navigation data derived from a menu item's URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub is_external: bool,
    pub target: LinkTarget,
    /// Application path for internal links, the absolute URL otherwise.
    pub to: String,
}

/// The hosts that count as "this shop".
///
/// Both values are normalized to a lowercase `host[:port]`; a full URL such
/// as `https://example.myshopify.com` is accepted and reduced to its host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopDomains {
    primary: String,
    store: String,
}

impl ShopDomains {
    pub fn new(primary: &str, store: &str) -> Self {
        Self {
            primary: normalize_host(primary),
            store: normalize_host(store),
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    /// Whether `url` points at the primary or the store domain.
    pub fn is_internal(&self, url: &Url) -> bool {
        let Some(host) = url_host(url) else {
            return false;
        };
        [&self.primary, &self.store]
            .into_iter()
            .any(|domain| !domain.is_empty() && *domain == host)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Map a resource type and URL pathname to an application-relative path.
///
/// Returns an empty string when the type is absent or the pathname is empty.
pub fn resolve_item_path(
    resource_type: Option<&ResourceType>,
    pathname: &str,
    prefixes: &RoutePrefixes,
) -> String {
    let Some(resource_type) = resource_type else {
        return String::new();
    };
    if pathname.is_empty() {
        return String::new();
    }

    // Trailing slashes do not produce an empty handle.
    let mut segments = pathname.split('/').filter(|s| !s.is_empty());
    let handle = segments.next_back().unwrap_or_default();

    match resource_type {
        ResourceType::Frontpage => "/".to_string(),
        ResourceType::Article => {
            let blog_handle = segments.next_back().unwrap_or_default();
            let blog_prefix = prefixes.get(&ResourceType::Blog);
            let parts: Vec<&str> = [blog_prefix, Some(blog_handle), Some(handle)]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect();
            format!("/{}/", parts.join("/"))
        }
        ResourceType::Collections | ResourceType::Search | ResourceType::Catalog => {
            format!("/{}", prefixes.get(resource_type).unwrap_or_default())
        }
        other => match prefixes.get(other) {
            Some(prefix) => format!("/{prefix}/{handle}"),
            None => format!("/{handle}"),
        },
    }
}

/// Classify a menu item's URL as internal or external.
///
/// Fails with [`StorefrontError::InvalidInput`] when the item has no url or
/// type, and with [`StorefrontError::UnparseableUrl`] when the url is not an
/// absolute URL. Callers drop such items.
pub fn classify_link(
    item: &MenuItem,
    domains: &ShopDomains,
    prefixes: &RoutePrefixes,
) -> Result<ResolvedLink> {
    let (Some(raw_url), Some(resource_type)) = (
        item.url.as_deref().filter(|u| !u.is_empty()),
        item.resource_type.as_ref(),
    ) else {
        return Err(StorefrontError::invalid_input(format!(
            "menu item '{}' must include a url and type",
            item.title
        )));
    };

    let url = Url::parse(raw_url).map_err(|e| StorefrontError::unparseable_url(raw_url, e))?;

    if domains.is_internal(&url) {
        Ok(ResolvedLink {
            is_external: false,
            target: LinkTarget::SameTab,
            to: resolve_item_path(Some(resource_type), url.path(), prefixes),
        })
    } else {
        Ok(ResolvedLink {
            is_external: true,
            target: LinkTarget::NewTab,
            to: raw_url.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `host[:port]` of a URL, port omitted when it is the scheme default.
fn url_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{host}:{port}")),
        None => Some(host),
    }
}

fn normalize_host(domain: &str) -> String {
    let trimmed = domain.trim();
    if trimmed.contains("://") {
        if let Some(host) = Url::parse(trimmed).ok().as_ref().and_then(url_host) {
            return host;
        }
    }
    trimmed.trim_end_matches('/').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(url: &str, resource_type: &str) -> MenuItem {
        MenuItem {
            id: "gid://shopify/MenuItem/1".into(),
            title: "Item".into(),
            url: Some(url.into()),
            resource_type: Some(resource_type.parse().unwrap()),
            ..MenuItem::default()
        }
    }

    fn domains() -> ShopDomains {
        ShopDomains::new("shop.example.com", "https://example.myshopify.com")
    }

    fn path(resource_type: ResourceType, pathname: &str) -> String {
        resolve_item_path(Some(&resource_type), pathname, &RoutePrefixes::default())
    }

    #[test]
    fn resolution_table() {
        assert_eq!(path(ResourceType::Frontpage, "/anything"), "/");
        assert_eq!(path(ResourceType::Product, "/x/widget"), "/products/widget");
        assert_eq!(path(ResourceType::Collections, "/x"), "/collections");
        assert_eq!(path(ResourceType::Article, "/blogs/news/my-post"), "/blogs/news/my-post/");
        assert_eq!(path(ResourceType::Search, "/search"), "/search");
        assert_eq!(path(ResourceType::Catalog, "/collections/all"), "/collections/all");
        assert_eq!(path(ResourceType::Collection, "/collections/hats"), "/collections/hats");
        assert_eq!(path(ResourceType::Page, "/pages/about"), "/pages/about");
        assert_eq!(path(ResourceType::Blog, "/blogs/news"), "/blogs/news");
        assert_eq!(
            path(ResourceType::ShopPolicy, "/policies/refund-policy"),
            "/policies/refund-policy"
        );
        assert_eq!(path(ResourceType::Http, "/some/where"), "/where");
        assert_eq!(path(ResourceType::Other("METAOBJECT".into()), "/a/b"), "/b");
    }

    #[test]
    fn missing_type_or_pathname_is_empty() {
        let prefixes = RoutePrefixes::default();
        assert_eq!(resolve_item_path(None, "/products/x", &prefixes), "");
        assert_eq!(resolve_item_path(Some(&ResourceType::Product), "", &prefixes), "");
    }

    #[test]
    fn article_without_blog_prefix() {
        let prefixes = RoutePrefixes::with_overrides([(ResourceType::Blog, "")]);
        assert_eq!(
            resolve_item_path(Some(&ResourceType::Article), "/blogs/news/my-post", &prefixes),
            "/news/my-post/"
        );
    }

    #[test]
    fn custom_prefixes_win() {
        let prefixes = RoutePrefixes::with_overrides([
            (ResourceType::Product, "shop/items"),
            (ResourceType::Collections, "browse"),
        ]);
        assert_eq!(
            resolve_item_path(Some(&ResourceType::Product), "/products/hat", &prefixes),
            "/shop/items/hat"
        );
        assert_eq!(
            resolve_item_path(Some(&ResourceType::Collections), "/collections", &prefixes),
            "/browse"
        );
    }

    #[test]
    fn internal_link_on_either_domain() {
        let prefixes = RoutePrefixes::default();
        for url in [
            "https://shop.example.com/products/hat",
            "https://example.myshopify.com/products/hat",
            "https://SHOP.example.com/products/hat",
        ] {
            let link = classify_link(&item(url, "PRODUCT"), &domains(), &prefixes).unwrap();
            assert!(!link.is_external, "{url}");
            assert_eq!(link.target, LinkTarget::SameTab);
            assert_eq!(link.to, "/products/hat");
        }
    }

    #[test]
    fn external_link_is_passed_through() {
        let raw = "https://instagram.com/example?utm=menu";
        let link =
            classify_link(&item(raw, "HTTP"), &domains(), &RoutePrefixes::default()).unwrap();
        assert!(link.is_external);
        assert_eq!(link.target, LinkTarget::NewTab);
        assert_eq!(link.to, raw);
    }

    #[test]
    fn port_is_part_of_the_host() {
        let domains = ShopDomains::new("localhost:3000", "");
        let prefixes = RoutePrefixes::default();
        let same_port = item("http://localhost:3000/pages/a", "PAGE");
        let other_port = item("http://localhost:4000/pages/a", "PAGE");
        let internal = classify_link(&same_port, &domains, &prefixes).unwrap();
        assert!(!internal.is_external);
        let external = classify_link(&other_port, &domains, &prefixes).unwrap();
        assert!(external.is_external);
    }

    #[test]
    fn classification_failures() {
        let prefixes = RoutePrefixes::default();

        let mut no_url = item("https://shop.example.com/x", "PAGE");
        no_url.url = None;
        assert!(matches!(
            classify_link(&no_url, &domains(), &prefixes),
            Err(StorefrontError::InvalidInput { .. })
        ));

        let mut no_type = item("https://shop.example.com/x", "PAGE");
        no_type.resource_type = None;
        assert!(matches!(
            classify_link(&no_type, &domains(), &prefixes),
            Err(StorefrontError::InvalidInput { .. })
        ));

        assert!(matches!(
            classify_link(&item("/relative/path", "PAGE"), &domains(), &prefixes),
            Err(StorefrontError::UnparseableUrl { .. })
        ));
    }

    #[test]
    fn reclassifying_resolved_paths_is_stable() {
        let prefixes = RoutePrefixes::default();
        let cases = [
            ("https://shop.example.com/products/hat", "PRODUCT"),
            ("https://shop.example.com/blogs/news/launch", "ARTICLE"),
            ("https://shop.example.com/collections", "COLLECTIONS"),
            ("https://shop.example.com/collections/all", "CATALOG"),
            ("https://shop.example.com/pages/about", "PAGE"),
            ("https://shop.example.com/policies/privacy-policy", "SHOP_POLICY"),
            ("https://shop.example.com/search", "SEARCH"),
            ("https://shop.example.com/", "FRONTPAGE"),
        ];
        for (url, t) in cases {
            let first = classify_link(&item(url, t), &domains(), &prefixes).unwrap();
            let again = classify_link(
                &item(&format!("https://shop.example.com{}", first.to), t),
                &domains(),
                &prefixes,
            )
            .unwrap();
            assert_eq!(first.to, again.to, "{t} {url}");
        }
    }

    #[test]
    fn normalize_host_accepts_urls_and_bare_hosts() {
        assert_eq!(normalize_host("https://Example.myshopify.com/"), "example.myshopify.com");
        assert_eq!(normalize_host(" shop.example.com/ "), "shop.example.com");
        assert_eq!(normalize_host("http://localhost:3000"), "localhost:3000");
    }
}
