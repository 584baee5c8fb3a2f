//! The dependency provider interface and its query filters.

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::notify::{AssetChangeListener, DiscoveryListener, Subscription};
use crate::asset::{AssetIdentifier, AssetMetadata, PackageDiskInfo, PackageName};
use crate::link::{AssetDependency, DependencyCategory, DependencyProperties};

/// Set of dependency categories a query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub package: bool,
    pub manage: bool,
    pub searchable_name: bool,
}

impl CategoryFilter {
    /// Every category.
    pub const ALL: Self = Self {
        package: true,
        manage: true,
        searchable_name: true,
    };

    /// Package links only.
    pub const PACKAGE: Self = Self {
        package: true,
        manage: false,
        searchable_name: false,
    };

    /// Categories shown in the referencer graph. Searchable-name referencers
    /// are left out.
    pub const REFERENCER_GRAPH: Self = Self {
        package: true,
        manage: true,
        searchable_name: false,
    };

    /// Whether `category` passes the filter.
    pub fn contains(self, category: DependencyCategory) -> bool {
        match category {
            DependencyCategory::Package => self.package,
            DependencyCategory::Manage => self.manage,
            DependencyCategory::SearchableName => self.searchable_name,
        }
    }
}

/// Requirement on the properties of returned records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyQuery {
    /// Any record.
    #[default]
    NoRequirements,
    /// Only hard records.
    Hard,
    /// Only soft records.
    Soft,
}

impl DependencyQuery {
    /// Whether a record with `properties` satisfies the query.
    pub fn matches(self, properties: DependencyProperties) -> bool {
        match self {
            DependencyQuery::NoRequirements => true,
            DependencyQuery::Hard => properties.hard,
            DependencyQuery::Soft => !properties.hard,
        }
    }
}

/// Source of dependency edges and asset metadata.
///
/// Every call is an authoritative synchronous read over an in-memory index;
/// there is no transient failure mode, so nothing here returns `Result`.
pub trait DependencyProvider: Send + Sync {
    /// Records of every asset that references `id`, restricted to
    /// `categories` and `query`. A referencer reached through several
    /// properties appears once per record.
    fn referencers(
        &self,
        id: &AssetIdentifier,
        categories: CategoryFilter,
        query: DependencyQuery,
    ) -> Vec<AssetDependency>;

    /// Identifiers of every asset `id` depends on.
    fn dependencies(
        &self,
        id: &AssetIdentifier,
        categories: CategoryFilter,
        query: DependencyQuery,
    ) -> Vec<AssetIdentifier>;

    /// Main asset metadata for each known package in `packages`, in one call.
    fn asset_metadata(&self, packages: &IndexSet<PackageName>) -> HashMap<PackageName, AssetMetadata>;

    /// Every asset stored in `package`.
    fn assets_by_package(&self, package: &PackageName) -> Vec<AssetMetadata>;

    /// On-disk information for `package`, if the package is known.
    fn package_disk_info(&self, package: &PackageName) -> Option<PackageDiskInfo>;

    /// Whether the index is still being populated.
    fn is_discovery_in_progress(&self) -> bool;

    /// Run `listener` once when discovery completes.
    fn on_discovery_complete(&self, listener: DiscoveryListener);

    /// Observe asset additions, removals and updates until the returned
    /// subscription is dropped.
    fn subscribe_asset_changes(&self, listener: AssetChangeListener) -> Subscription;

    /// Whether `package` has unsaved in-memory edits, meaning the index
    /// shows its last saved references.
    fn is_package_modified(&self, _package: &PackageName) -> bool {
        false
    }
}
