//! Reference Explorer Core
//!
//! This crate builds the referencer graph of a single asset from an asset
//! dependency index and lays it out for display. It implements:
//!
//! - Classification of raw dependency records into five link categories
//! - Link discovery with merging, importance ordering and redirector chasing
//! - A node table keyed by asset identifier and a disposable visual projection
//! - A deterministic radial layout
//! - An explorer controller with discovery deferral and staleness tracking
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `asset`: Asset identifiers and metadata
//! - `link`: Dependency records, link categories and their ordering
//! - `provider`: The dependency provider interface and an in-memory index
//! - `graph`: Node table, rebuild, layout and visual projection
//! - `explorer`: Rebuild policy, status and reference lists
//! - `fields`: Referencing-field summaries
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use refexplorer_core::asset::{AssetIdentifier, AssetMetadata};
//! use refexplorer_core::config::ExplorerConfig;
//! use refexplorer_core::explorer::ReferenceExplorer;
//! use refexplorer_core::link::{DependencyCategory, DependencyProperties};
//! use refexplorer_core::provider::InMemoryProvider;
//!
//! let provider = Arc::new(InMemoryProvider::new());
//! provider.add_asset(AssetMetadata::new("/Game/Sword", "Sword", "StaticMesh"));
//! provider.add_asset(AssetMetadata::new("/Game/Knight", "Knight", "Blueprint"));
//! provider.add_dependency(
//!     AssetIdentifier::package("/Game/Knight"),
//!     AssetIdentifier::package("/Game/Sword"),
//!     DependencyCategory::Package,
//!     DependencyProperties::new(true, true),
//! );
//!
//! let explorer = ReferenceExplorer::new(provider, &ExplorerConfig::default());
//! let outcome = explorer.set_root(AssetIdentifier::package("/Game/Sword"));
//!
//! let graph = outcome.graph().expect("discovery is complete");
//! assert_eq!(graph.nodes().len(), 2);
//! ```

pub mod asset;
pub mod config;
pub mod error;
pub mod explorer;
pub mod fields;
pub mod graph;
pub mod link;
pub mod provider;

pub use error::{Error, Result};
pub use explorer::{RebuildOutcome, ReferenceExplorer};
pub use graph::{GraphModel, VisualGraph};
