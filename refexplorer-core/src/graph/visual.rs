//! Visual Projection
//!
//! A [`VisualGraph`] is a disposable, render-ready copy of the node table:
//! positioned nodes with display titles, and colored edges. It is rebuilt
//! from scratch on every rebuild and is never the source of truth.

use std::collections::HashMap;

use serde::Serialize;

use super::layout::Position;
use crate::asset::{AssetIdentifier, AssetMetadata, ACTOR_LABEL_TAG, DATA_TABLE_CLASS};
use crate::error::{Error, Result};
use crate::link::{LinearColor, LinkCategory};

/// Title color of primary asset nodes.
pub const PRIMARY_ASSET_COLOR: LinearColor = LinearColor::rgb(0.2, 0.8, 0.2);

/// Title color of package nodes whose asset type has no color.
pub const DEFAULT_ASSET_TYPE_COLOR: LinearColor = LinearColor::rgb(0.55, 0.55, 0.55);

/// Title color of searchable-name nodes.
pub const VALUE_COLOR: LinearColor = LinearColor::rgb(0.0, 0.55, 0.62);

const SCRIPT_PREFIX: &str = "/Script/";

/// What a visual node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A content package.
    Package,
    /// A native code package (`/Script/...`).
    Script,
    /// A managed (primary) asset.
    PrimaryAsset,
    /// A searchable name.
    Value,
}

/// A positioned, titled node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    pub id: AssetIdentifier,
    pub position: Position,
    /// First title line: the asset's display name.
    pub title: String,
    /// Second title line: the asset's type.
    pub type_name: String,
    /// Package path shown under package nodes.
    pub comment: Option<String>,
    pub kind: NodeKind,
    pub title_color: LinearColor,
    /// Whether the renderer should draw an asset thumbnail.
    pub uses_thumbnail: bool,
    pub asset_data: Option<AssetMetadata>,
}

impl VisualNode {
    /// Build the display form of `id` at `position`.
    pub fn new(id: AssetIdentifier, position: Position, asset_data: Option<&AssetMetadata>) -> Self {
        let mut title = asset_data.map(|a| a.asset_name.clone()).unwrap_or_default();
        let mut type_name = asset_data.map(|a| a.asset_class.clone()).unwrap_or_default();

        let kind = match &id {
            AssetIdentifier::PrimaryAsset { asset_type, name } => {
                title = format!("{}:{}", asset_type, name);
                type_name = "Manager".to_string();
                NodeKind::PrimaryAsset
            }
            AssetIdentifier::Value { object, value, .. } => {
                title = value.clone();
                type_name = match asset_data {
                    Some(asset) if asset.asset_class == DATA_TABLE_CLASS => {
                        format!("In DataTable {}", object)
                    }
                    _ => object.clone(),
                };
                NodeKind::Value
            }
            AssetIdentifier::Package { package } if asset_data.is_none() => {
                if package.is_script() {
                    title = package
                        .as_str()
                        .strip_prefix(SCRIPT_PREFIX)
                        .unwrap_or(package.as_str())
                        .to_string();
                    type_name = "Script".to_string();
                    NodeKind::Script
                } else {
                    title = package.short_name().to_string();
                    NodeKind::Package
                }
            }
            AssetIdentifier::Package { .. } => NodeKind::Package,
        };

        if let Some(label) = asset_data.and_then(|a| a.tag(ACTOR_LABEL_TAG)) {
            title = label.to_string();
        }

        let is_package = matches!(kind, NodeKind::Package | NodeKind::Script);
        let comment = match &id {
            AssetIdentifier::Package { package } => Some(package.to_string()),
            _ => None,
        };

        let title_color = match kind {
            NodeKind::PrimaryAsset => PRIMARY_ASSET_COLOR,
            NodeKind::Package | NodeKind::Script => asset_data
                .and_then(|a| a.type_color)
                .unwrap_or(DEFAULT_ASSET_TYPE_COLOR),
            NodeKind::Value => VALUE_COLOR,
        };

        Self {
            id,
            position,
            title,
            type_name,
            comment,
            kind,
            title_color,
            uses_thumbnail: is_package && asset_data.is_some(),
            asset_data: if is_package { asset_data.cloned() } else { None },
        }
    }

    /// Both title lines joined the way the node header shows them.
    pub fn full_title(&self) -> String {
        format!("{}\n{}", self.title, self.type_name)
    }
}

/// A referencer edge: `referencer` depends on `target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualEdge {
    pub referencer: AssetIdentifier,
    pub target: AssetIdentifier,
    pub category: LinkCategory,
    /// Pin name of the referencer's dependency pin.
    pub pin_name: String,
    pub color: LinearColor,
}

impl VisualEdge {
    /// Create an edge colored by `category`.
    pub fn new(referencer: AssetIdentifier, target: AssetIdentifier, category: LinkCategory) -> Self {
        Self {
            referencer,
            target,
            category,
            pin_name: category.name().to_string(),
            color: category.color(),
        }
    }
}

/// Render-ready projection of a built graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualGraph {
    root: AssetIdentifier,
    nodes: Vec<VisualNode>,
    edges: Vec<VisualEdge>,
    #[serde(skip)]
    lookup: HashMap<AssetIdentifier, usize>,
}

impl VisualGraph {
    /// Create a projection holding only its root node.
    pub fn new(root: VisualNode) -> Self {
        let mut graph = Self {
            root: root.id.clone(),
            nodes: Vec::new(),
            edges: Vec::new(),
            lookup: HashMap::new(),
        };
        graph.add_node(root);
        graph
    }

    /// Add a node. Returns `false` if a node with the same id exists.
    pub fn add_node(&mut self, node: VisualNode) -> bool {
        if self.lookup.contains_key(&node.id) {
            return false;
        }
        self.lookup.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Connect two existing nodes.
    pub fn add_edge(&mut self, edge: VisualEdge) -> Result<()> {
        for id in [&edge.referencer, &edge.target] {
            if !self.lookup.contains_key(id) {
                return Err(Error::MissingNode(id.clone()));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Identifier of the root node.
    pub fn root(&self) -> &AssetIdentifier {
        &self.root
    }

    /// The root node.
    pub fn root_node(&self) -> Option<&VisualNode> {
        self.node(&self.root)
    }

    /// Look up a node.
    pub fn node(&self, id: &AssetIdentifier) -> Option<&VisualNode> {
        self.lookup.get(id).map(|&index| &self.nodes[index])
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    /// All edges in creation order.
    pub fn edges(&self) -> &[VisualEdge] {
        &self.edges
    }

    /// Edges whose target is `id`.
    pub fn referencer_edges<'a>(&'a self, id: &'a AssetIdentifier) -> impl Iterator<Item = &'a VisualEdge> + 'a {
        self.edges.iter().filter(move |edge| &edge.target == id)
    }

    /// Encode as JSON for a rendering adapter.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Json)
    }

    /// Encode as MessagePack for a rendering adapter.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }
}
