//! In-Memory Provider
//!
//! A [`DependencyProvider`] backed by plain maps. Hosts that already hold
//! their dependency index in memory can load it here directly (or from a
//! JSON [`IndexSnapshot`]); the crate's tests use it as their fixture.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::notify::{
    AssetChange, AssetChangeListener, AssetChangeNotifier, DiscoveryListener, DiscoveryNotifier,
    Subscription,
};
use super::query::{CategoryFilter, DependencyProvider, DependencyQuery};
use crate::asset::{AssetIdentifier, AssetMetadata, PackageDiskInfo, PackageName};
use crate::error::{Error, Result};
use crate::link::{AssetDependency, DependencyCategory, DependencyProperties};

/// One edge of a serialized index: `referencer` depends on `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub referencer: AssetIdentifier,
    pub target: AssetIdentifier,
    pub category: DependencyCategory,
    #[serde(default)]
    pub properties: DependencyProperties,
}

/// On-disk state of one package in a serialized index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: PackageName,
    pub disk_size: i64,
    #[serde(default)]
    pub modified: bool,
}

/// Serializable form of a whole dependency index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSnapshot {
    pub dependencies: Vec<DependencyEdge>,
    pub assets: Vec<AssetMetadata>,
    pub packages: Vec<PackageRecord>,
}

#[derive(Default)]
struct Index {
    /// target -> records naming each referencer
    referencers: HashMap<AssetIdentifier, Vec<AssetDependency>>,
    /// referencer -> records naming each dependency
    dependencies: HashMap<AssetIdentifier, Vec<AssetDependency>>,
    assets: IndexMap<PackageName, Vec<AssetMetadata>>,
    disk: HashMap<PackageName, PackageDiskInfo>,
    modified: HashSet<PackageName>,
}

/// Dependency provider over an in-memory index.
pub struct InMemoryProvider {
    index: RwLock<Index>,
    discovering: AtomicBool,
    discovery: DiscoveryNotifier,
    changes: Arc<AssetChangeNotifier>,
}

impl InMemoryProvider {
    /// Create an empty, fully discovered provider.
    pub fn new() -> Self {
        Self {
            index: RwLock::new(Index::default()),
            discovering: AtomicBool::new(false),
            discovery: DiscoveryNotifier::new(),
            changes: AssetChangeNotifier::new(),
        }
    }

    /// Build a provider from a snapshot. No change notifications are sent.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Self {
        let provider = Self::new();
        {
            let mut index = provider.index.write();
            for edge in snapshot.dependencies {
                index.insert_edge(edge);
            }
            for asset in snapshot.assets {
                index.insert_asset(asset);
            }
            for package in snapshot.packages {
                index
                    .disk
                    .insert(package.name.clone(), PackageDiskInfo { disk_size: package.disk_size });
                if package.modified {
                    index.modified.insert(package.name);
                }
            }
        }
        provider
    }

    /// Parse a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: IndexSnapshot = serde_json::from_str(json).map_err(Error::Config)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Load a JSON snapshot from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Record that `referencer` depends on `target`.
    pub fn add_dependency(
        &self,
        referencer: AssetIdentifier,
        target: AssetIdentifier,
        category: DependencyCategory,
        properties: DependencyProperties,
    ) {
        self.index.write().insert_edge(DependencyEdge {
            referencer,
            target,
            category,
            properties,
        });
    }

    /// Add an asset and notify listeners.
    ///
    /// A package seen for the first time gets a valid (zero) disk size.
    pub fn add_asset(&self, asset: AssetMetadata) {
        self.index.write().insert_asset(asset.clone());
        self.changes.notify(&AssetChange::Added(asset));
    }

    /// Replace the metadata of an existing asset (matched by package and
    /// name) and notify listeners.
    pub fn update_asset(&self, asset: AssetMetadata) {
        {
            let mut index = self.index.write();
            let assets = index.assets.entry(asset.package_name.clone()).or_default();
            match assets.iter_mut().find(|a| a.asset_name == asset.asset_name) {
                Some(existing) => *existing = asset.clone(),
                None => assets.push(asset.clone()),
            }
        }
        self.changes.notify(&AssetChange::Updated(asset));
    }

    /// Remove every asset, edge and disk record of `package` and notify
    /// listeners once per removed asset.
    pub fn remove_package(&self, package: &PackageName) {
        let removed = {
            let mut index = self.index.write();
            index.disk.remove(package);
            index.modified.remove(package);
            let in_package = |id: &AssetIdentifier| id.package_name() == Some(package);
            index.referencers.retain(|target, _| !in_package(target));
            index.dependencies.retain(|referencer, _| !in_package(referencer));
            for records in index.referencers.values_mut() {
                records.retain(|record| !in_package(&record.asset_id));
            }
            for records in index.dependencies.values_mut() {
                records.retain(|record| !in_package(&record.asset_id));
            }
            index.assets.shift_remove(package).unwrap_or_default()
        };
        for asset in removed {
            self.changes.notify(&AssetChange::Removed(asset));
        }
    }

    /// Set the on-disk size of `package`. Negative sizes mark it unusable.
    pub fn set_package_disk_size(&self, package: impl Into<PackageName>, disk_size: i64) {
        self.index
            .write()
            .disk
            .insert(package.into(), PackageDiskInfo { disk_size });
    }

    /// Flag `package` as having unsaved in-memory edits.
    pub fn set_package_modified(&self, package: impl Into<PackageName>, modified: bool) {
        let package = package.into();
        let mut index = self.index.write();
        if modified {
            index.modified.insert(package);
        } else {
            index.modified.remove(&package);
        }
    }

    /// Enter the discovery phase.
    pub fn begin_discovery(&self) {
        self.discovering.store(true, Ordering::SeqCst);
    }

    /// Leave the discovery phase and run the queued completion listeners.
    pub fn finish_discovery(&self) {
        self.discovering.store(false, Ordering::SeqCst);
        let ran = self.discovery.fire();
        debug!(listeners = ran, "asset discovery complete");
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Index {
    fn insert_edge(&mut self, edge: DependencyEdge) {
        self.referencers
            .entry(edge.target.clone())
            .or_default()
            .push(AssetDependency::new(edge.referencer.clone(), edge.category, edge.properties));
        self.dependencies
            .entry(edge.referencer)
            .or_default()
            .push(AssetDependency::new(edge.target, edge.category, edge.properties));
    }

    fn insert_asset(&mut self, asset: AssetMetadata) {
        self.disk
            .entry(asset.package_name.clone())
            .or_insert(PackageDiskInfo { disk_size: 0 });
        self.assets
            .entry(asset.package_name.clone())
            .or_default()
            .push(asset);
    }
}

fn passes(record: &AssetDependency, categories: CategoryFilter, query: DependencyQuery) -> bool {
    categories.contains(record.category) && query.matches(record.properties)
}

impl DependencyProvider for InMemoryProvider {
    fn referencers(
        &self,
        id: &AssetIdentifier,
        categories: CategoryFilter,
        query: DependencyQuery,
    ) -> Vec<AssetDependency> {
        self.index
            .read()
            .referencers
            .get(id)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| passes(record, categories, query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn dependencies(
        &self,
        id: &AssetIdentifier,
        categories: CategoryFilter,
        query: DependencyQuery,
    ) -> Vec<AssetIdentifier> {
        let index = self.index.read();
        let Some(records) = index.dependencies.get(id) else {
            return Vec::new();
        };
        let unique: IndexSet<&AssetIdentifier> = records
            .iter()
            .filter(|record| passes(record, categories, query))
            .map(|record| &record.asset_id)
            .collect();
        unique.into_iter().cloned().collect()
    }

    fn asset_metadata(&self, packages: &IndexSet<PackageName>) -> HashMap<PackageName, AssetMetadata> {
        let index = self.index.read();
        packages
            .iter()
            .filter_map(|package| {
                let asset = index.assets.get(package)?.first()?;
                Some((package.clone(), asset.clone()))
            })
            .collect()
    }

    fn assets_by_package(&self, package: &PackageName) -> Vec<AssetMetadata> {
        self.index
            .read()
            .assets
            .get(package)
            .cloned()
            .unwrap_or_default()
    }

    fn package_disk_info(&self, package: &PackageName) -> Option<PackageDiskInfo> {
        self.index.read().disk.get(package).copied()
    }

    fn is_discovery_in_progress(&self) -> bool {
        self.discovering.load(Ordering::SeqCst)
    }

    fn on_discovery_complete(&self, listener: DiscoveryListener) {
        self.discovery.register(listener);
    }

    fn subscribe_asset_changes(&self, listener: AssetChangeListener) -> Subscription {
        self.changes.subscribe(listener)
    }

    fn is_package_modified(&self, package: &PackageName) -> bool {
        self.index.read().modified.contains(package)
    }
}
