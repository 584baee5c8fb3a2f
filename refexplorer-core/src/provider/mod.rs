//! Dependency Providers
//!
//! The graph builder never talks to an asset registry directly. It consumes
//! the [`DependencyProvider`] trait, which answers referencer/dependency
//! queries and metadata lookups synchronously from an in-memory index.
//!
//! # Discovery
//!
//! While the provider is still populating its index,
//! [`DependencyProvider::is_discovery_in_progress`] returns `true` and
//! callers are expected to defer work by registering a one-shot listener
//! with [`DependencyProvider::on_discovery_complete`] instead of blocking.
//!
//! # Change notifications
//!
//! Asset additions, removals and updates are broadcast to listeners
//! registered with [`DependencyProvider::subscribe_asset_changes`]. The
//! listener stays registered for as long as the returned [`Subscription`]
//! is alive.

mod memory;
mod notify;
mod query;

pub use memory::{DependencyEdge, InMemoryProvider, IndexSnapshot, PackageRecord};
pub use notify::{
    AssetChange, AssetChangeListener, AssetChangeNotifier, DiscoveryListener, DiscoveryNotifier,
    ListenerId, Subscription,
};
pub use query::{CategoryFilter, DependencyProvider, DependencyQuery};
