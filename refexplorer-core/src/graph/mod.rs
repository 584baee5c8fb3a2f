//! Reference Graph
//!
//! This module builds the referencer graph of a single root asset and
//! projects it into a positioned, render-ready form.
//!
//! # Overview
//!
//! The graph is a directed graph keyed by [`AssetIdentifier`]:
//!
//! - Nodes are the root and every asset found by walking referencers
//!   outward from it
//! - An edge from parent P to child C means C references P
//!
//! Cycles between assets are allowed. Each distinct identifier gets exactly
//! one node, so a node reached through several parents is shared, and a
//! parent never links the same child twice.
//!
//! # Design Decisions
//!
//! 1. The node table ([`GraphModel`]) is the only source of truth. The
//!    [`VisualGraph`] is rebuilt from it on every rebuild and can be thrown
//!    away at any time.
//!
//! 2. The table is keyed by identifier for O(1) lookups and keeps discovery
//!    order, so repeated rebuilds over the same data are identical.
//!
//! 3. Layout is a pure function of the child count and the parent position
//!    ([`RadialLayout`]).
//!
//! [`AssetIdentifier`]: crate::asset::AssetIdentifier

mod layout;
mod model;
mod node;
mod visual;

pub use layout::{Position, RadialLayout};
pub use model::{GraphModel, GraphState, SortedLinks};
pub use node::{ChildLinks, NodeInfo};
pub use visual::{
    NodeKind, VisualEdge, VisualGraph, VisualNode, DEFAULT_ASSET_TYPE_COLOR, PRIMARY_ASSET_COLOR,
    VALUE_COLOR,
};
