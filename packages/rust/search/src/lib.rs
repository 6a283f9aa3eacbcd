//! Predictive search aggregation for the storefront.
//!
//! Everything here is a pure transform over an already-fetched response:
//! - [`normalize_predictive_search`]: raw API payload to result groups with URLs
//! - [`group_results`]: split groups by type and settle the displayed total
//! - [`select_result`]: the navigation intent of a selected result
//! - [`SearchSession`]: explicit per-input session state
//! - [`SearchView`]: empty state, clusters, and the "view all" link

mod aggregate;
mod normalize;
mod types;
mod view;

pub use aggregate::{GroupedResults, NavigationIntent, SearchSession, group_results, select_result};
pub use normalize::{
    BlogRef, Nodes, NormalizedResults, PredictiveSearchPayload, RawArticle, RawPage, RawProduct,
    RawQuery, RawVariant, SearchInput, normalize_predictive_search,
};
pub use types::{GroupType, Image, Money, ResultGroup, ResultItem, ResultKind};
pub use view::{
    ClusterKind, ResultCluster, SearchState, SearchView, SearchViewOptions, ViewAllLink,
};
