//! Dependency Classification
//!
//! Pure functions mapping raw dependency records onto [`LinkCategory`] and
//! ordering records from most to least important.

use std::cmp::Ordering;

use super::category::LinkCategory;
use super::record::{AssetDependency, DependencyCategory, DependencyProperties};

/// A link counts as hard when it is hard or direct.
///
/// Direct soft references are shown as hard so that they stand out.
pub fn is_hard(properties: DependencyProperties) -> bool {
    properties.hard || properties.direct
}

/// Non-package links (management references) are always used in game.
pub fn is_used_in_game(properties: DependencyProperties, category: DependencyCategory) -> bool {
    category != DependencyCategory::Package || properties.game
}

/// Classify one dependency record. The result is always active.
pub fn classify(category: DependencyCategory, properties: DependencyProperties) -> LinkCategory {
    LinkCategory::active(is_hard(properties), is_used_in_game(properties, category))
}

/// Classify a provider record.
pub fn classify_dependency(dependency: &AssetDependency) -> LinkCategory {
    classify(dependency.category, dependency.properties)
}

/// Importance ordering of dependency records.
///
/// Category rank ascending, then hard before soft, then package name. Full
/// identifier order breaks the remaining ties so the result never depends
/// on the order the provider returned records in.
pub fn compare_dependencies(a: &AssetDependency, b: &AssetDependency) -> Ordering {
    a.category
        .rank()
        .cmp(&b.category.rank())
        .then_with(|| is_hard(b.properties).cmp(&is_hard(a.properties)))
        .then_with(|| a.asset_id.cmp_package_name(&b.asset_id))
        .then_with(|| a.asset_id.cmp(&b.asset_id))
}

/// Sort records from most to least important.
pub fn sort_dependencies(dependencies: &mut [AssetDependency]) {
    dependencies.sort_by(compare_dependencies);
}
