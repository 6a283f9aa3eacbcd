//! Predictive search result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result group key, as used by the search UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Queries,
    Articles,
    Products,
    Pages,
    /// Any group this UI does not render (e.g. `collections`).
    #[serde(other)]
    Other,
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Queries => "queries",
            Self::Articles => "articles",
            Self::Products => "products",
            Self::Pages => "pages",
            Self::Other => "other",
        })
    }
}

/// Storefront API `__typename` of a single result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    SearchQuerySuggestion,
    Article,
    Product,
    Page,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

/// One renderable predictive search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(rename = "__typename", alias = "type")]
    pub kind: ResultKind,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Suggestion text, for query suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Suggestion text with the matched part highlighted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styled_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

impl ResultItem {
    pub fn new(kind: ResultKind, title: impl Into<String>, url: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            kind,
            id: title.clone(),
            title,
            url: url.into(),
            text: None,
            styled_title: None,
            image: None,
            price: None,
        }
    }

    /// A query suggestion result.
    pub fn suggestion(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut item = Self::new(ResultKind::SearchQuerySuggestion, text.clone(), "");
        item.text = Some(text);
        item
    }
}

/// Results of one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    #[serde(rename = "type")]
    pub group_type: GroupType,
    pub items: Vec<ResultItem>,
}

impl ResultGroup {
    pub fn new(group_type: GroupType, items: Vec<ResultItem>) -> Self {
        Self { group_type, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_item_accepts_type_or_typename() {
        let a: ResultItem =
            serde_json::from_str(r#"{"type":"SearchQuerySuggestion","text":"shoes"}"#)
                .expect("deserialize");
        let b: ResultItem =
            serde_json::from_str(r#"{"__typename":"Product","url":"/products/red-shoes"}"#)
                .expect("deserialize");
        assert_eq!(a.kind, ResultKind::SearchQuerySuggestion);
        assert_eq!(a.text.as_deref(), Some("shoes"));
        assert_eq!(b.kind, ResultKind::Product);
        assert_eq!(b.url, "/products/red-shoes");
    }

    #[test]
    fn unknown_typename_is_other() {
        let item: ResultItem =
            serde_json::from_str(r#"{"__typename":"Collection","url":"/collections/a"}"#)
                .expect("deserialize");
        assert_eq!(item.kind, ResultKind::Other);
    }

    #[test]
    fn unknown_group_type_is_other() {
        let group: ResultGroup =
            serde_json::from_str(r#"{"type":"collections","items":[]}"#).expect("deserialize");
        assert_eq!(group.group_type, GroupType::Other);
    }

    #[test]
    fn group_serializes_with_type_key() {
        let group = ResultGroup::new(GroupType::Pages, vec![]);
        let json = serde_json::to_string(&group).expect("serialize");
        assert_eq!(json, r#"{"type":"pages","items":[]}"#);
    }
}
