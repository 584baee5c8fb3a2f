//! Graph Nodes
//!
//! This module defines the per-identifier record kept in the node table.

use std::collections::HashSet;

use smallvec::SmallVec;

use crate::asset::{AssetIdentifier, AssetMetadata};
use crate::link::LinkCategory;

/// Outgoing links of a node, in sorted-link order.
pub type ChildLinks = SmallVec<[(AssetIdentifier, LinkCategory); 8]>;

/// One distinct identifier appearing in the built graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    /// Identity of the node. Fixed at creation.
    id: AssetIdentifier,

    /// Main asset metadata, filled in by the batched metadata pass.
    asset_data: Option<AssetMetadata>,

    /// Referencers discovered from this node, in the order they were
    /// discovered (which is the sorted-link order).
    children: ChildLinks,

    /// Nodes that list this node as a child. Only used to keep an edge from
    /// being inserted twice; never traversed.
    parents: HashSet<AssetIdentifier>,
}

impl NodeInfo {
    /// Create a node with no edges and no metadata.
    pub fn new(id: AssetIdentifier) -> Self {
        Self {
            id,
            asset_data: None,
            children: SmallVec::new(),
            parents: HashSet::new(),
        }
    }

    /// Get the node's identifier.
    pub fn id(&self) -> &AssetIdentifier {
        &self.id
    }

    /// Get the resolved asset metadata, if any.
    pub fn asset_data(&self) -> Option<&AssetMetadata> {
        self.asset_data.as_ref()
    }

    /// Replace the asset metadata.
    pub fn set_asset_data(&mut self, asset_data: Option<AssetMetadata>) {
        self.asset_data = asset_data;
    }

    /// Get the outgoing links.
    pub fn children(&self) -> &[(AssetIdentifier, LinkCategory)] {
        &self.children
    }

    /// Category of the link to `child`, if there is one.
    pub fn child_category(&self, child: &AssetIdentifier) -> Option<LinkCategory> {
        self.children
            .iter()
            .find(|(id, _)| id == child)
            .map(|(_, category)| *category)
    }

    /// Get the parent set.
    pub fn parents(&self) -> &HashSet<AssetIdentifier> {
        &self.parents
    }

    /// Whether `parent` already links to this node.
    pub fn has_parent(&self, parent: &AssetIdentifier) -> bool {
        self.parents.contains(parent)
    }

    /// Whether the node has no outgoing links.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn add_child(&mut self, child: AssetIdentifier, category: LinkCategory) {
        self.children.push((child, category));
    }

    pub(crate) fn add_parent(&mut self, parent: AssetIdentifier) {
        self.parents.insert(parent);
    }

    pub(crate) fn reserve_children(&mut self, additional: usize) {
        self.children.reserve(additional);
    }
}
