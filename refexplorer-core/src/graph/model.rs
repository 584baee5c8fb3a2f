//! Graph Model
//!
//! The model owns the node table and rebuilds it from a dependency provider.
//!
//! # Rebuild
//!
//! 1. Clear the table and seed it with the root.
//! 2. Expand level by level: query the sorted links of every node on the
//!    frontier and link each referencer as a child, creating nodes for
//!    identifiers seen for the first time. An identifier that already has a
//!    node is linked again only if this parent has not linked it yet.
//! 3. Resolve asset metadata for every package in the table in one batch.
//! 4. Project the table into a positioned [`VisualGraph`].
//!
//! # Link discovery
//!
//! Referencer records of a node are sorted by importance (see
//! [`compare_dependencies`]), merged per referencer by taking the union of
//! their categories, and then filtered for unusable packages. A package with
//! no disk entry or a negative size is dropped; if it holds a redirector,
//! the redirector's own referencers take its place in the order and go
//! through the same check, so chains of redirectors are followed.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, error, info, trace};

use super::layout::{Position, RadialLayout};
use super::node::NodeInfo;
use super::visual::{VisualEdge, VisualGraph, VisualNode};
use crate::asset::{AssetIdentifier, PackageName};
use crate::config::ExplorerConfig;
use crate::error::{Error, Result};
use crate::link::{classify_dependency, sort_dependencies, LinkCategory};
use crate::provider::{CategoryFilter, DependencyProvider, DependencyQuery};

/// Referencer links of one node, most important first.
pub type SortedLinks = IndexMap<AssetIdentifier, LinkCategory>;

/// Whether the node table reflects the provider's current data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    /// The table was rebuilt and no change has been observed since.
    Clean,

    /// The root changed, the provider reported a change, or the graph was
    /// never built.
    Dirty,
}

/// Owns the node table and rebuilds it on request.
pub struct GraphModel {
    provider: Arc<dyn DependencyProvider>,
    layout: RadialLayout,
    search_depth: usize,
    max_breadth: Option<usize>,

    root: Option<AssetIdentifier>,
    root_origin: Position,

    /// All nodes of the last rebuild, keyed by identifier, in discovery order.
    node_infos: IndexMap<AssetIdentifier, NodeInfo>,

    state: GraphState,
}

impl GraphModel {
    /// Create a model with the default configuration.
    pub fn new(provider: Arc<dyn DependencyProvider>) -> Self {
        Self::with_config(provider, &ExplorerConfig::default())
    }

    /// Create a model with the given configuration.
    pub fn with_config(provider: Arc<dyn DependencyProvider>, config: &ExplorerConfig) -> Self {
        Self {
            provider,
            layout: RadialLayout::new(config.layout),
            search_depth: config.search_depth,
            max_breadth: config.max_breadth,
            root: None,
            root_origin: config.root_origin,
            node_infos: IndexMap::new(),
            state: GraphState::Dirty,
        }
    }

    /// The provider queried on rebuild.
    pub fn provider(&self) -> &Arc<dyn DependencyProvider> {
        &self.provider
    }

    /// Focus the graph on `root`, laid out from `origin`.
    ///
    /// The node table is left untouched until the next rebuild.
    pub fn set_root(&mut self, root: AssetIdentifier, origin: Position) {
        debug!(root = %root, "graph root set");
        self.root = Some(root);
        self.root_origin = origin;
        self.state = GraphState::Dirty;
    }

    /// The current root, if one was set.
    pub fn root(&self) -> Option<&AssetIdentifier> {
        self.root.as_ref()
    }

    /// Layout position of the root.
    pub fn root_origin(&self) -> Position {
        self.root_origin
    }

    /// The root's node from the last rebuild.
    pub fn root_node_info(&self) -> Option<&NodeInfo> {
        self.root.as_ref().and_then(|root| self.node_infos.get(root))
    }

    /// Look up a node from the last rebuild.
    pub fn node_info(&self, id: &AssetIdentifier) -> Option<&NodeInfo> {
        self.node_infos.get(id)
    }

    /// The whole node table.
    pub fn node_infos(&self) -> &IndexMap<AssetIdentifier, NodeInfo> {
        &self.node_infos
    }

    /// Current state.
    pub fn state(&self) -> GraphState {
        self.state
    }

    /// Whether a rebuild is needed to reflect the provider.
    pub fn is_dirty(&self) -> bool {
        self.state == GraphState::Dirty
    }

    /// Record that the provider's data changed since the last rebuild.
    pub fn mark_dirty(&mut self) {
        if self.state == GraphState::Clean {
            trace!("graph marked dirty");
        }
        self.state = GraphState::Dirty;
    }

    /// Rebuild the node table from scratch and project it.
    ///
    /// Returns `None` when no root is set. Rebuilding twice without provider
    /// changes yields identical node tables.
    pub fn rebuild_graph(&mut self) -> Option<VisualGraph> {
        let Some(root) = self.root.clone() else {
            debug!("rebuild requested without a root");
            return None;
        };

        self.node_infos.clear();
        self.node_infos.insert(root.clone(), NodeInfo::new(root.clone()));

        self.expand_from_root(&root);
        self.gather_asset_data();
        self.state = GraphState::Clean;

        match self.project(&root) {
            Ok(graph) => {
                info!(
                    root = %root,
                    nodes = graph.nodes().len(),
                    edges = graph.edges().len(),
                    "rebuilt reference graph"
                );
                Some(graph)
            }
            Err(err) => {
                error!(root = %root, error = %err, "failed to project reference graph");
                None
            }
        }
    }

    /// Referencer links of `id`, merged, sorted and with unusable packages
    /// replaced by their redirectors' referencers.
    pub fn sorted_links(&self, id: &AssetIdentifier) -> SortedLinks {
        let mut records = self.query_referencers(id);
        sort_dependencies(&mut records);

        let mut links = SortedLinks::with_capacity(records.len());
        for record in &records {
            links
                .entry(record.asset_id.clone())
                .or_insert(LinkCategory::active(false, false))
                .merge(classify_dependency(record));
        }

        let ids = self.resolve_redirectors(links.keys().cloned().collect(), &mut links);

        let mut resolved: SortedLinks = ids
            .into_iter()
            .filter_map(|id| {
                let category = *links.get(&id)?;
                Some((id, category))
            })
            .collect();

        if let Some(max_breadth) = self.max_breadth {
            resolved.truncate(max_breadth);
        }
        resolved
    }

    fn query_referencers(&self, id: &AssetIdentifier) -> Vec<crate::link::AssetDependency> {
        self.provider.referencers(
            id,
            CategoryFilter::REFERENCER_GRAPH,
            DependencyQuery::NoRequirements,
        )
    }

    /// Walk `ids` in order, dropping unusable packages and splicing in the
    /// referencers of redirectors at the dropped position. Spliced entries
    /// are checked in turn. New referencers are merged into `links`.
    fn resolve_redirectors(
        &self,
        mut ids: Vec<AssetIdentifier>,
        links: &mut SortedLinks,
    ) -> Vec<AssetIdentifier> {
        let mut chased: HashSet<PackageName> = HashSet::new();
        let mut pending: HashSet<AssetIdentifier> = ids.iter().cloned().collect();
        let mut index = 0;

        while index < ids.len() {
            let Some(package) = ids[index].package_name().cloned() else {
                index += 1;
                continue;
            };
            if self.is_package_resolvable(&package) {
                index += 1;
                continue;
            }

            let removed = ids.remove(index);
            pending.remove(&removed);

            // A redirector already chased in this pass is only dropped, which
            // keeps redirector cycles from splicing forever.
            if !chased.insert(package.clone()) || !self.is_redirector_package(&package) {
                debug!(package = %package, "dropping unresolvable package");
                continue;
            }

            let mut redirected = self.query_referencers(&AssetIdentifier::package(package.clone()));
            sort_dependencies(&mut redirected);

            let mut spliced: IndexSet<AssetIdentifier> = IndexSet::new();
            for record in &redirected {
                links
                    .entry(record.asset_id.clone())
                    .or_insert(LinkCategory::active(false, false))
                    .merge(classify_dependency(record));
                if !pending.contains(&record.asset_id) {
                    spliced.insert(record.asset_id.clone());
                }
            }

            debug!(
                redirector = %package,
                referencers = spliced.len(),
                "substituting redirector with its referencers"
            );
            pending.extend(spliced.iter().cloned());
            ids.splice(index..index, spliced);
        }

        ids
    }

    fn is_package_resolvable(&self, package: &PackageName) -> bool {
        self.provider
            .package_disk_info(package)
            .is_some_and(|info| info.is_valid())
    }

    fn is_redirector_package(&self, package: &PackageName) -> bool {
        self.provider
            .assets_by_package(package)
            .iter()
            .any(|asset| asset.is_redirector())
    }

    /// Breadth-first expansion up to the configured depth.
    fn expand_from_root(&mut self, root: &AssetIdentifier) {
        let mut frontier = vec![root.clone()];
        let mut expanded: HashSet<AssetIdentifier> = HashSet::new();

        for _ in 0..self.search_depth {
            let mut next = Vec::new();
            for parent in frontier {
                if !expanded.insert(parent.clone()) {
                    continue;
                }
                let links = self.sorted_links(&parent);
                self.link_children(&parent, links, &mut next);
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
    }

    /// Link every entry of `links` as a child of `parent`. Nodes created for
    /// the first time are pushed onto `created`.
    fn link_children(
        &mut self,
        parent: &AssetIdentifier,
        links: SortedLinks,
        created: &mut Vec<AssetIdentifier>,
    ) {
        if let Some(parent_info) = self.node_infos.get_mut(parent) {
            parent_info.reserve_children(links.len());
        }

        for (child, category) in links {
            if &child == parent {
                continue;
            }

            let link = match self.node_infos.get_mut(&child) {
                None => {
                    let mut info = NodeInfo::new(child.clone());
                    info.add_parent(parent.clone());
                    self.node_infos.insert(child.clone(), info);
                    created.push(child.clone());
                    true
                }
                Some(info) if !info.has_parent(parent) => {
                    info.add_parent(parent.clone());
                    true
                }
                Some(_) => false,
            };

            if link {
                if let Some(parent_info) = self.node_infos.get_mut(parent) {
                    parent_info.add_child(child, category);
                }
            }
        }
    }

    /// Fill in asset metadata for every node with one provider call.
    fn gather_asset_data(&mut self) {
        let packages: IndexSet<PackageName> = self
            .node_infos
            .keys()
            .filter_map(|id| id.package_name().cloned())
            .collect();

        let metadata = self.provider.asset_metadata(&packages);
        trace!(
            packages = packages.len(),
            resolved = metadata.len(),
            "gathered asset metadata"
        );

        for (id, info) in self.node_infos.iter_mut() {
            // A package shares its metadata with the values that live in it.
            let asset = id
                .package_name()
                .and_then(|package| metadata.get(package).cloned());
            info.set_asset_data(asset);
        }
    }

    /// Build the visual projection of the node table.
    fn project(&self, root: &AssetIdentifier) -> Result<VisualGraph> {
        let root_info = self
            .node_infos
            .get(root)
            .ok_or_else(|| Error::MissingNode(root.clone()))?;

        let mut graph = VisualGraph::new(VisualNode::new(
            root.clone(),
            self.root_origin,
            root_info.asset_data(),
        ));
        self.create_child_nodes(root, self.root_origin, &mut graph)?;
        Ok(graph)
    }

    /// Create the visual nodes of `id`'s children around `location` and
    /// wire each child back to `id`, recursing into children seen for the
    /// first time.
    fn create_child_nodes(
        &self,
        id: &AssetIdentifier,
        location: Position,
        graph: &mut VisualGraph,
    ) -> Result<()> {
        let info = self
            .node_infos
            .get(id)
            .ok_or_else(|| Error::MissingNode(id.clone()))?;
        let positions = self.layout.child_positions(location, info.children().len());

        for ((child, category), position) in info.children().iter().zip(positions) {
            let child_info = self
                .node_infos
                .get(child)
                .ok_or_else(|| Error::MissingNode(child.clone()))?;

            let created = graph.add_node(VisualNode::new(
                child.clone(),
                position,
                child_info.asset_data(),
            ));
            graph.add_edge(VisualEdge::new(child.clone(), id.clone(), *category))?;

            if created {
                self.create_child_nodes(child, position, graph)?;
            }
        }
        Ok(())
    }
}
