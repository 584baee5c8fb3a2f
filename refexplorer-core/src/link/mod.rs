//! Dependency Links
//!
//! Raw dependency records come from a provider with a category
//! (package / manage / searchable name) and property flags. This module
//! turns them into the small [`LinkCategory`] tag used for coloring and
//! sorting, and defines the importance order of records.
//!
//! # Categories
//!
//! - Hard: the record is hard or direct.
//! - Used in game: the record is not a package link, or carries the game flag.
//! - Every category derived from a record is active; passive is reserved for
//!   pin ends that are not (yet) part of an edge.

mod category;
mod classify;
mod record;

pub use category::{LinearColor, LinkCategory, LinkDisplay};
pub use classify::{
    classify, classify_dependency, compare_dependencies, is_hard, is_used_in_game,
    sort_dependencies,
};
pub use record::{AssetDependency, DependencyCategory, DependencyProperties};
