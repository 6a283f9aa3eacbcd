//! Navigation menu resolution for the storefront.
//!
//! Turns a Storefront API menu (absolute URLs tagged with a resource type)
//! into a renderable tree: internal links become application paths opened in
//! the same tab, anything on a foreign host stays absolute and opens in a new
//! tab. Items with a missing or unparseable url are dropped with a warning.
//!
//! - [`resolve_item_path`]: the resource type to route table
//! - [`classify_link`]: internal vs external decision for one item
//! - [`resolve_menu_tree`]: the whole menu, recursively
//! - [`LocaleTable`]: locale lookup from the request path prefix

mod link;
mod locale;
mod resource;
mod tree;

pub use link::{LinkTarget, ResolvedLink, ShopDomains, classify_link, resolve_item_path};
pub use locale::LocaleTable;
pub use resource::{ResourceType, RoutePrefixes};
pub use tree::{Menu, MenuItem, MenuOptions, ResolvedMenu, ResolvedMenuItem, resolve_menu_tree};
