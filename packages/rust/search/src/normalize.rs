//! Normalization of a raw predictive search payload into result groups.
//!
//! Each raw resource carries a handle and, optionally, Shopify's
//! `trackingParameters` string; the normalized item carries the final,
//! locale-prefixed storefront URL with those parameters appended.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::form_urlencoded;

use storefront_shared::{Result, StorefrontError};

use crate::aggregate::group_results;
use crate::types::{GroupType, Image, Money, ResultGroup, ResultItem, ResultKind};

// ---------------------------------------------------------------------------
// Raw payload (Storefront API `predictiveSearch` shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveSearchPayload {
    #[serde(default)]
    pub queries: Vec<RawQuery>,
    #[serde(default)]
    pub products: Vec<RawProduct>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
    #[serde(default)]
    pub pages: Vec<RawPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuery {
    pub text: String,
    #[serde(default)]
    pub styled_text: Option<String>,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
    #[serde(default)]
    pub variants: Option<Nodes<RawVariant>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVariant {
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub price: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub blog: BlogRef,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogRef {
    pub handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalized output
// ---------------------------------------------------------------------------

/// Non-empty result groups plus the number of items across them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResults {
    pub results: Vec<ResultGroup>,
    pub total_results: usize,
}

/// Any of the JSON shapes a search response can arrive in.
#[derive(Debug, Clone)]
pub enum SearchInput {
    /// `{ "predictiveSearch": {...} }` or the bare payload object.
    Payload(PredictiveSearchPayload),
    /// Already-grouped `[{ "type": ..., "items": [...] }]`.
    Groups(Vec<ResultGroup>),
}

impl SearchInput {
    /// Detect the input shape and decode it.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| StorefrontError::parse(format!("search input is not JSON: {e}")))?;

        let decoded = match value {
            serde_json::Value::Array(_) => {
                serde_json::from_value(value).map(|groups| Self::Groups(known_groups(groups)))
            }
            serde_json::Value::Object(mut map) => {
                let payload = match map.remove("predictiveSearch") {
                    Some(inner) => inner,
                    None => serde_json::Value::Object(map),
                };
                serde_json::from_value(payload).map(Self::Payload)
            }
            other => {
                return Err(StorefrontError::parse(format!(
                    "search input must be an object or array, got {other}"
                )));
            }
        };

        decoded.map_err(|e| StorefrontError::parse(format!("invalid search input: {e}")))
    }

    /// Produce result groups, normalizing a raw payload when needed.
    pub fn into_results(self, locale_prefix: &str) -> NormalizedResults {
        match self {
            Self::Payload(payload) => normalize_predictive_search(&payload, locale_prefix),
            Self::Groups(groups) => {
                let total_results = group_results(&groups, None).total_results;
                NormalizedResults {
                    results: groups,
                    total_results,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Build result groups from a raw payload.
///
/// Groups are emitted in the order queries, products, articles, pages; a type
/// with no results produces no group.
#[instrument(skip_all, fields(locale = %locale_prefix))]
pub fn normalize_predictive_search(
    payload: &PredictiveSearchPayload,
    locale_prefix: &str,
) -> NormalizedResults {
    let prefix = locale_prefix.trim_end_matches('/');
    let mut results = Vec::new();

    let queries: Vec<ResultItem> = payload
        .queries
        .iter()
        .map(|query| {
            let q: String = form_urlencoded::byte_serialize(query.text.as_bytes()).collect();
            let params = tracking_query(
                Some(format!("q={q}").as_str()),
                query.tracking_parameters.as_deref(),
            );
            ResultItem {
                text: Some(query.text.clone()),
                styled_title: query.styled_text.clone(),
                ..ResultItem::new(
                    ResultKind::SearchQuerySuggestion,
                    query.text.clone(),
                    format!("{prefix}/search{params}"),
                )
            }
        })
        .collect();
    push_group(&mut results, GroupType::Queries, queries);

    let products: Vec<ResultItem> = payload
        .products
        .iter()
        .map(|product| {
            let params = tracking_query(None, product.tracking_parameters.as_deref());
            let variant = product.variants.as_ref().and_then(|v| v.nodes.first());
            ResultItem {
                id: product.id.clone(),
                image: variant.and_then(|v| v.image.clone()),
                price: variant.and_then(|v| v.price.clone()),
                ..ResultItem::new(
                    ResultKind::Product,
                    product.title.clone(),
                    format!("{prefix}/products/{}{params}", product.handle),
                )
            }
        })
        .collect();
    push_group(&mut results, GroupType::Products, products);

    let articles: Vec<ResultItem> = payload
        .articles
        .iter()
        .map(|article| {
            let params = tracking_query(None, article.tracking_parameters.as_deref());
            ResultItem {
                id: article.id.clone(),
                image: article.image.clone(),
                ..ResultItem::new(
                    ResultKind::Article,
                    article.title.clone(),
                    format!(
                        "{prefix}/blogs/{}/{}{params}",
                        article.blog.handle, article.handle
                    ),
                )
            }
        })
        .collect();
    push_group(&mut results, GroupType::Articles, articles);

    let pages: Vec<ResultItem> = payload
        .pages
        .iter()
        .map(|page| {
            let params = tracking_query(None, page.tracking_parameters.as_deref());
            ResultItem {
                id: page.id.clone(),
                ..ResultItem::new(
                    ResultKind::Page,
                    page.title.clone(),
                    format!("{prefix}/pages/{}{params}", page.handle),
                )
            }
        })
        .collect();
    push_group(&mut results, GroupType::Pages, pages);

    let total_results = results.iter().map(|g| g.items.len()).sum();
    debug!(groups = results.len(), total_results, "predictive search normalized");

    NormalizedResults {
        results,
        total_results,
    }
}

/// Drop groups of a type the UI does not render.
fn known_groups(groups: Vec<ResultGroup>) -> Vec<ResultGroup> {
    groups
        .into_iter()
        .filter(|group| {
            let known = group.group_type != GroupType::Other;
            if !known {
                warn!(items = group.items.len(), "dropping search result group of unknown type");
            }
            known
        })
        .collect()
}

fn push_group(results: &mut Vec<ResultGroup>, group_type: GroupType, items: Vec<ResultItem>) {
    if !items.is_empty() {
        results.push(ResultGroup::new(group_type, items));
    }
}

/// `?params&tracking`, `?params`, `?tracking`, or the empty string.
fn tracking_query(params: Option<&str>, tracking: Option<&str>) -> String {
    let tracking = tracking.filter(|t| !t.is_empty());
    match (params, tracking) {
        (Some(p), Some(t)) => format!("?{p}&{t}"),
        (Some(p), None) => format!("?{p}"),
        (None, Some(t)) => format!("?{t}"),
        (None, None) => String::new(),
    }
}
