//! Menu tree types and recursive resolution.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use storefront_shared::{AppConfig, Locale, Result};

use crate::link::{LinkTarget, ShopDomains, classify_link};
use crate::resource::{ResourceType, RoutePrefixes};

// ---------------------------------------------------------------------------
// Raw menu (Storefront API shape)
// ---------------------------------------------------------------------------

/// A navigation menu as returned by the Storefront API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<MenuItem>>,
}

/// A menu entry before resolution. Any field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<MenuItem>>,
}

// ---------------------------------------------------------------------------
// Resolved menu
// ---------------------------------------------------------------------------

/// A menu whose items all carry a navigation target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMenu {
    pub id: String,
    pub items: Vec<ResolvedMenuItem>,
}

/// A renderable menu node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMenuItem {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub is_external: bool,
    pub target: LinkTarget,
    pub to: String,
    pub items: Vec<ResolvedMenuItem>,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Everything menu resolution needs from the surrounding request.
#[derive(Debug, Clone, Default)]
pub struct MenuOptions {
    pub domains: ShopDomains,
    pub prefixes: RoutePrefixes,
    /// When set, internal paths are prefixed with the locale's path prefix.
    pub locale: Option<Locale>,
}

impl MenuOptions {
    pub fn new(domains: ShopDomains) -> Self {
        Self {
            domains,
            ..Self::default()
        }
    }

    pub fn with_prefixes(mut self, prefixes: RoutePrefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Build options from the loaded config.
    ///
    /// Fails when no store domain is configured (see
    /// [`storefront_shared::resolve_store_domain`]).
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = storefront_shared::resolve_store_domain(config)?;
        Ok(Self::new(ShopDomains::new(&config.shop.primary_domain, &store))
            .with_prefixes(RoutePrefixes::from_config(&config.menu)))
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve every item of `menu`, dropping items that fail classification.
///
/// Returns `None` when the menu has no items array.
#[instrument(skip_all, fields(menu = %menu.id))]
pub fn resolve_menu_tree(menu: &Menu, opts: &MenuOptions) -> Option<ResolvedMenu> {
    let Some(items) = menu.items.as_deref() else {
        warn!("invalid menu: no items array");
        return None;
    };

    let items = resolve_items(items, opts);
    debug!(items = items.len(), "menu resolved");

    Some(ResolvedMenu {
        id: menu.id.clone(),
        items,
    })
}

fn resolve_items(items: &[MenuItem], opts: &MenuOptions) -> Vec<ResolvedMenuItem> {
    items
        .iter()
        .filter_map(|item| match resolve_item(item, opts) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                warn!(id = %item.id, title = %item.title, error = %e, "dropping menu item");
                None
            }
        })
        .collect()
}

fn resolve_item(item: &MenuItem, opts: &MenuOptions) -> Result<ResolvedMenuItem> {
    let link = classify_link(item, &opts.domains, &opts.prefixes)?;

    let to = match &opts.locale {
        Some(locale) if !link.is_external => locale.localize(&link.to),
        _ => link.to,
    };

    let items = item
        .items
        .as_deref()
        .map(|children| resolve_items(children, opts))
        .unwrap_or_default();

    // classify_link guarantees both are present
    Ok(ResolvedMenuItem {
        id: item.id.clone(),
        title: item.title.clone(),
        url: item.url.clone().unwrap_or_default(),
        resource_type: item.resource_type.clone().unwrap_or(ResourceType::Http),
        resource_id: item.resource_id.clone(),
        tags: item.tags.clone(),
        is_external: link.is_external,
        target: link.target,
        to,
        items,
    })
}
