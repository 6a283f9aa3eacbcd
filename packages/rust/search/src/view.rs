//! View model for the predictive search dropdown.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use storefront_shared::SearchConfig;

use crate::aggregate::SearchSession;
use crate::types::{GroupType, ResultGroup, ResultItem};

/// Where the "view all results" link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchViewOptions {
    /// Full search page route, e.g. `/search`.
    pub search_path: String,
    /// Locale path prefix, empty for the default locale.
    pub locale_prefix: String,
}

impl Default for SearchViewOptions {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl SearchViewOptions {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            search_path: config.search_path.clone(),
            locale_prefix: String::new(),
        }
    }

    pub fn with_locale_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.locale_prefix = prefix.into();
        self
    }

    /// `{locale}{search_path}?q={term}`, term form-encoded.
    pub fn view_all_url(&self, term: &str) -> String {
        let q: String = form_urlencoded::byte_serialize(term.as_bytes()).collect();
        let path = format!("/{}", self.search_path.trim_matches('/'));
        format!("{}{path}?q={q}", self.locale_prefix.trim_end_matches('/'))
    }
}

/// A visual block of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClusterKind {
    /// Query suggestions rendered together with articles.
    QueriesAndArticles,
    Products,
    Pages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCluster {
    pub kind: ClusterKind,
    /// Non-empty groups in display order.
    pub groups: Vec<ResultGroup>,
}

/// What the dropdown body shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SearchState {
    /// Nothing searched yet; render nothing.
    Idle,
    /// Searched, found nothing.
    NoResults { term: String },
    Results { clusters: Vec<ResultCluster> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewAllLink {
    pub term: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    #[serde(flatten)]
    pub state: SearchState,
    /// Present whenever the term is non-empty, with or without results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_all: Option<ViewAllLink>,
    /// Banner text for the no-results state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

impl SearchView {
    /// The state follows `total_results`, not the item count: an explicit
    /// nonzero total with no renderable items yields `Results` with no
    /// clusters and no banner.
    pub fn build(session: &SearchSession, opts: &SearchViewOptions) -> Self {
        let term = session.search_term.as_str();

        let state = if session.total_results == 0 {
            if term.is_empty() {
                SearchState::Idle
            } else {
                SearchState::NoResults {
                    term: term.to_string(),
                }
            }
        } else {
            SearchState::Results {
                clusters: clusters(session),
            }
        };

        let view_all = (!term.is_empty()).then(|| ViewAllLink {
            term: term.to_string(),
            url: opts.view_all_url(term),
        });

        let banner = match &state {
            SearchState::NoResults { term } => Some(format!("No results found for {term}")),
            _ => None,
        };

        Self {
            state,
            view_all,
            banner,
        }
    }
}

fn clusters(session: &SearchSession) -> Vec<ResultCluster> {
    let grouped = session.grouped();

    let layout: [(ClusterKind, Vec<(GroupType, Vec<ResultItem>)>); 3] = [
        (
            ClusterKind::QueriesAndArticles,
            vec![
                (GroupType::Queries, grouped.queries),
                (GroupType::Articles, grouped.articles),
            ],
        ),
        (ClusterKind::Products, vec![(GroupType::Products, grouped.products)]),
        (ClusterKind::Pages, vec![(GroupType::Pages, grouped.pages)]),
    ];

    layout
        .into_iter()
        .filter_map(|(kind, groups)| {
            let groups: Vec<ResultGroup> = groups
                .into_iter()
                .filter(|(_, items)| !items.is_empty())
                .map(|(group_type, items)| ResultGroup::new(group_type, items))
                .collect();
            (!groups.is_empty()).then_some(ResultCluster { kind, groups })
        })
        .collect()
}
