//! Grouping, result selection, and the search session state machine.

use serde::{Deserialize, Serialize};

use crate::types::{GroupType, ResultGroup, ResultItem, ResultKind};

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Results split by type, with the total the UI should display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedResults {
    pub queries: Vec<ResultItem>,
    pub articles: Vec<ResultItem>,
    pub products: Vec<ResultItem>,
    pub pages: Vec<ResultItem>,
    pub total_results: usize,
}

/// Split `groups` by type. Missing types are empty.
///
/// An `explicit_total` is authoritative and is never recomputed: the backend
/// total may count results that were truncated before they reached us.
pub fn group_results(groups: &[ResultGroup], explicit_total: Option<usize>) -> GroupedResults {
    let items_of = |group_type: GroupType| {
        groups
            .iter()
            .find(|g| g.group_type == group_type)
            .map(|g| g.items.clone())
            .unwrap_or_default()
    };

    let queries = items_of(GroupType::Queries);
    let articles = items_of(GroupType::Articles);
    let products = items_of(GroupType::Products);
    let pages = items_of(GroupType::Pages);

    let total_results = explicit_total
        .unwrap_or_else(|| queries.len() + articles.len() + products.len() + pages.len());

    GroupedResults {
        queries,
        articles,
        products,
        pages,
        total_results,
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// What the UI should do when a result is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum NavigationIntent {
    /// Replace the input value with `text` and refocus it; no navigation.
    FillInput { text: String },
    /// Blur and clear the input, then navigate to `url`.
    NavigateTo { url: String },
}

/// Decide the effect of selecting `item`. Performs no side effects.
pub fn select_result(item: &ResultItem) -> NavigationIntent {
    match item.kind {
        ResultKind::SearchQuerySuggestion => NavigationIntent::FillInput {
            text: item.text.clone().unwrap_or_else(|| item.title.clone()),
        },
        _ => NavigationIntent::NavigateTo {
            url: item.url.clone(),
        },
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// State of one search input session. The UI owns the cell; transitions
/// consume the old value and return the new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSession {
    pub search_term: String,
    pub results: Option<Vec<ResultGroup>>,
    pub total_results: usize,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The input changed. An empty term resets the session.
    pub fn with_term(self, term: impl Into<String>) -> Self {
        let term = term.into();
        if term.is_empty() {
            return Self::default();
        }
        Self {
            search_term: term,
            ..self
        }
    }

    /// New results arrived for the current term.
    pub fn with_results(self, results: Vec<ResultGroup>, explicit_total: Option<usize>) -> Self {
        let total_results = group_results(&results, explicit_total).total_results;
        Self {
            results: Some(results),
            total_results,
            ..self
        }
    }

    /// Apply a selection. Filling the input keeps the results on screen;
    /// navigating away ends the session.
    pub fn apply(self, intent: &NavigationIntent) -> Self {
        match intent {
            NavigationIntent::FillInput { text } => Self {
                search_term: text.clone(),
                ..self
            },
            NavigationIntent::NavigateTo { .. } => Self::default(),
        }
    }

    pub fn clear(self) -> Self {
        Self::default()
    }

    pub fn grouped(&self) -> GroupedResults {
        group_results(
            self.results.as_deref().unwrap_or_default(),
            Some(self.total_results),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str) -> ResultItem {
        ResultItem::new(
            ResultKind::Product,
            title,
            format!("/products/{}", title.to_lowercase()),
        )
    }

    fn sample_groups() -> Vec<ResultGroup> {
        vec![
            ResultGroup::new(
                GroupType::Queries,
                vec![ResultItem::suggestion("hat"), ResultItem::suggestion("hats")],
            ),
            ResultGroup::new(
                GroupType::Products,
                vec![product("Beanie"), product("Cap"), product("Fedora")],
            ),
        ]
    }

    #[test]
    fn group_results_sums_when_no_total() {
        let grouped = group_results(&sample_groups(), None);
        assert_eq!(grouped.queries.len(), 2);
        assert_eq!(grouped.products.len(), 3);
        assert!(grouped.articles.is_empty());
        assert!(grouped.pages.is_empty());
        assert_eq!(grouped.total_results, 5);
    }

    #[test]
    fn explicit_total_is_authoritative() {
        let grouped = group_results(&sample_groups(), Some(7));
        assert_eq!(grouped.total_results, 7);
    }

    #[test]
    fn empty_input_groups_to_nothing() {
        let grouped = group_results(&[], None);
        assert_eq!(grouped, GroupedResults::default());
    }

    #[test]
    fn first_group_of_a_type_wins() {
        let groups = vec![
            ResultGroup::new(
                GroupType::Pages,
                vec![ResultItem::new(ResultKind::Page, "A", "/pages/a")],
            ),
            ResultGroup::new(GroupType::Pages, vec![]),
        ];
        assert_eq!(group_results(&groups, None).pages.len(), 1);
    }

    #[test]
    fn selecting_a_suggestion_fills_the_input() {
        let intent = select_result(&ResultItem::suggestion("shoes"));
        assert_eq!(
            intent,
            NavigationIntent::FillInput {
                text: "shoes".into()
            }
        );
    }

    #[test]
    fn selecting_anything_else_navigates() {
        let item = ResultItem::new(ResultKind::Product, "Red Shoes", "/products/red-shoes");
        assert_eq!(
            select_result(&item),
            NavigationIntent::NavigateTo {
                url: "/products/red-shoes".into()
            }
        );
        let other = ResultItem::new(ResultKind::Other, "Sale", "/collections/sale");
        assert!(matches!(select_result(&other), NavigationIntent::NavigateTo { .. }));
    }

    #[test]
    fn intent_serializes_with_tag() {
        let json = serde_json::to_string(&NavigationIntent::FillInput { text: "x".into() })
            .expect("serialize");
        assert_eq!(json, r#"{"intent":"fillInput","text":"x"}"#);
    }

    #[test]
    fn session_transitions() {
        let session = SearchSession::new()
            .with_term("hat")
            .with_results(sample_groups(), None);
        assert_eq!(session.total_results, 5);
        assert_eq!(session.grouped().products.len(), 3);

        let filled = session.clone().apply(&select_result(&ResultItem::suggestion("hats")));
        assert_eq!(filled.search_term, "hats");
        assert!(filled.results.is_some());

        let navigated = session.clone().apply(&NavigationIntent::NavigateTo {
            url: "/products/cap".into(),
        });
        assert_eq!(navigated, SearchSession::default());

        assert_eq!(session.clone().with_term(""), SearchSession::default());
        assert_eq!(session.clear(), SearchSession::default());
    }
}
