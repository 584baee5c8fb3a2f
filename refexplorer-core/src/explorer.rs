//! Reference Explorer
//!
//! [`ReferenceExplorer`] drives a [`GraphModel`] the way an editor panel
//! does: it picks the root, decides when a rebuild may run, keeps the last
//! projection around, and tracks whether the provider changed since.
//!
//! # Deferral
//!
//! While the provider is still discovering assets a rebuild would see a
//! partial index. Instead of blocking, the explorer registers a one-shot
//! discovery listener (at most one at a time) and rebuilds when it fires.
//!
//! # Staleness
//!
//! After the first completed rebuild the explorer subscribes to asset
//! changes. A change only marks the results stale; it never rebuilds on its
//! own, so bulk edits do not cause a rebuild per asset.

use std::sync::{Arc, Weak};

use indexmap::IndexSet;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::asset::{AssetIdentifier, PackageName};
use crate::config::ExplorerConfig;
use crate::error::{Error, Result};
use crate::graph::{GraphModel, NodeInfo, Position, VisualGraph};
use crate::provider::{
    AssetChange, AssetChangeListener, CategoryFilter, DependencyProvider, DependencyQuery,
    Subscription,
};

const STALE_RESULTS_STATUS: &str = "Saved references changed, refresh for update";

/// Result of a rebuild request.
#[derive(Debug, Clone, PartialEq)]
pub enum RebuildOutcome {
    /// The graph was rebuilt.
    Built(VisualGraph),
    /// Discovery is in progress; the rebuild runs when it completes.
    Deferred,
    /// No root is set.
    Empty,
}

impl RebuildOutcome {
    /// The built graph, if the rebuild ran.
    pub fn graph(&self) -> Option<&VisualGraph> {
        match self {
            Self::Built(graph) => Some(graph),
            _ => None,
        }
    }
}

/// Mutable explorer state, shared with the provider's listeners.
struct ExplorerState {
    model: GraphModel,
    graph: Option<VisualGraph>,
    awaiting_discovery: bool,
    stale: bool,
    changes: Option<Subscription>,
}

impl ExplorerState {
    fn rebuild_now(&mut self, this: &Weak<Mutex<ExplorerState>>) -> RebuildOutcome {
        self.graph = self.model.rebuild_graph();
        self.stale = false;

        if self.changes.is_none() {
            let state = this.clone();
            let listener: AssetChangeListener = Arc::new(move |change: &AssetChange| {
                if let Some(state) = state.upgrade() {
                    state.lock().mark_stale(change);
                }
            });
            self.changes = Some(self.model.provider().subscribe_asset_changes(listener));
            trace!("subscribed to asset changes");
        }

        match &self.graph {
            Some(graph) => RebuildOutcome::Built(graph.clone()),
            None => RebuildOutcome::Empty,
        }
    }

    fn mark_stale(&mut self, change: &AssetChange) {
        if !self.stale {
            debug!(package = %change.asset().package_name, "reference results are stale");
        }
        self.stale = true;
        self.model.mark_dirty();
    }
}

/// Controller around a [`GraphModel`].
pub struct ReferenceExplorer {
    provider: Arc<dyn DependencyProvider>,
    root_origin: Position,
    state: Arc<Mutex<ExplorerState>>,
}

impl ReferenceExplorer {
    /// Create an explorer with no root.
    pub fn new(provider: Arc<dyn DependencyProvider>, config: &ExplorerConfig) -> Self {
        let model = GraphModel::with_config(provider.clone(), config);
        Self {
            provider,
            root_origin: config.root_origin,
            state: Arc::new(Mutex::new(ExplorerState {
                model,
                graph: None,
                awaiting_discovery: false,
                stale: false,
                changes: None,
            })),
        }
    }

    /// Show the referencers of `root` and rebuild.
    pub fn set_root(&self, root: AssetIdentifier) -> RebuildOutcome {
        self.state.lock().model.set_root(root, self.root_origin);
        self.rebuild()
    }

    /// Re-root the graph on a node that is currently shown.
    pub fn focus(&self, id: &AssetIdentifier) -> RebuildOutcome {
        self.set_root(id.clone())
    }

    /// Rebuild, e.g. after the results went stale.
    pub fn refresh(&self) -> RebuildOutcome {
        self.rebuild()
    }

    /// Rebuild now, or once discovery completes if it is still running.
    ///
    /// The discovery listener is registered without holding the state lock,
    /// so a provider may run it before `on_discovery_complete` returns.
    pub fn rebuild(&self) -> RebuildOutcome {
        if self.provider.is_discovery_in_progress() {
            let register = {
                let mut state = self.state.lock();
                !std::mem::replace(&mut state.awaiting_discovery, true)
            };
            if register {
                let weak = Arc::downgrade(&self.state);
                self.provider
                    .on_discovery_complete(Box::new(move || Self::finish_deferred(&weak)));
                debug!("asset discovery in progress, deferring rebuild");
            }

            // Discovery may have finished before the listener was queued.
            if self.provider.is_discovery_in_progress() {
                return RebuildOutcome::Deferred;
            }
        }

        let mut state = self.state.lock();
        state.awaiting_discovery = false;
        state.rebuild_now(&Arc::downgrade(&self.state))
    }

    fn finish_deferred(this: &Weak<Mutex<ExplorerState>>) {
        let Some(state) = this.upgrade() else {
            return;
        };
        let mut state = state.lock();
        state.awaiting_discovery = false;
        state.rebuild_now(this);
    }

    /// Whether a rebuild is waiting for discovery to complete.
    pub fn is_awaiting_discovery(&self) -> bool {
        self.state.lock().awaiting_discovery
    }

    /// Whether the shown results are out of date: never built, waiting for
    /// discovery, or changed by the provider since the last rebuild.
    pub fn is_dirty(&self) -> bool {
        let state = self.state.lock();
        state.stale || state.model.is_dirty()
    }

    /// Whether the explorer listens for asset changes.
    pub fn is_subscribed(&self) -> bool {
        self.state.lock().changes.is_some()
    }

    /// Status line for the panel, if there is anything to report.
    pub fn status_text(&self) -> Option<String> {
        let state = self.state.lock();

        if let Some(AssetIdentifier::Package { package }) = state.model.root() {
            if self.provider.is_package_modified(package) {
                return Some(format!(
                    "Showing old saved references for edited asset {}",
                    package.short_name()
                ));
            }
        }

        state.stale.then(|| STALE_RESULTS_STATUS.to_string())
    }

    /// The current root.
    pub fn root(&self) -> Option<AssetIdentifier> {
        self.state.lock().model.root().cloned()
    }

    /// The last built projection.
    pub fn graph(&self) -> Option<VisualGraph> {
        self.state.lock().graph.clone()
    }

    /// A copy of the root's node from the last rebuild.
    pub fn root_node_info(&self) -> Option<NodeInfo> {
        self.state.lock().model.root_node_info().cloned()
    }

    /// Encode the last projection as JSON.
    ///
    /// Fails with [`Error::RootNotSet`] until a rebuild with a root has run.
    pub fn graph_json(&self) -> Result<String> {
        let state = self.state.lock();
        state.graph.as_ref().ok_or(Error::RootNotSet)?.to_json()
    }

    /// Run `f` against the model.
    pub fn with_model<R>(&self, f: impl FnOnce(&GraphModel) -> R) -> R {
        f(&self.state.lock().model)
    }

    /// Hard and soft package dependencies of every selected package, as text.
    pub fn referenced_objects_list(&self, selection: &[AssetIdentifier]) -> String {
        let mut list = String::new();
        for package in selected_packages(selection) {
            let id = AssetIdentifier::package(package.clone());
            let hard = self.dependency_packages(&id, DependencyQuery::Hard);
            let soft = self.dependency_packages(&id, DependencyQuery::Soft);
            write_reference_section(&mut list, &package, "Dependencies", &hard, &soft);
        }
        list
    }

    /// Hard and soft package referencers of every selected package, as text.
    pub fn referencing_objects_list(&self, selection: &[AssetIdentifier]) -> String {
        let mut list = String::new();
        for package in selected_packages(selection) {
            let id = AssetIdentifier::package(package.clone());
            let hard = self.referencer_packages(&id, DependencyQuery::Hard);
            let soft = self.referencer_packages(&id, DependencyQuery::Soft);
            write_reference_section(&mut list, &package, "Referencers", &hard, &soft);
        }
        list
    }

    fn dependency_packages(&self, id: &AssetIdentifier, query: DependencyQuery) -> IndexSet<PackageName> {
        self.provider
            .dependencies(id, CategoryFilter::PACKAGE, query)
            .iter()
            .filter_map(|dependency| dependency.package_name().cloned())
            .collect()
    }

    fn referencer_packages(&self, id: &AssetIdentifier, query: DependencyQuery) -> IndexSet<PackageName> {
        self.provider
            .referencers(id, CategoryFilter::PACKAGE, query)
            .iter()
            .filter_map(|record| record.asset_id.package_name().cloned())
            .collect()
    }
}

/// Distinct package names of the selected package nodes, in selection order.
fn selected_packages(selection: &[AssetIdentifier]) -> IndexSet<PackageName> {
    selection
        .iter()
        .filter(|id| id.is_package())
        .filter_map(|id| id.package_name().cloned())
        .collect()
}

fn write_reference_section(
    out: &mut String,
    package: &PackageName,
    heading: &str,
    hard: &IndexSet<PackageName>,
    soft: &IndexSet<PackageName>,
) {
    out.push_str(&format!("[{package} - {heading}]\n"));
    for (label, packages) in [("HARD", hard), ("SOFT", soft)] {
        if packages.is_empty() {
            continue;
        }
        out.push_str(&format!("  [{label}]\n"));
        for package in packages {
            out.push_str(&format!("    {}.{}\n", package, package.short_name()));
        }
    }
}
