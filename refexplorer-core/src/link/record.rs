//! Raw dependency records as reported by a provider.

use serde::{Deserialize, Serialize};

use crate::asset::AssetIdentifier;
use crate::error::{Error, Result};

/// What kind of relationship a dependency edge describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyCategory {
    /// One package loads or references another.
    Package,
    /// The asset-management layer tracks the asset under a primary asset id.
    Manage,
    /// A searchable name (tag, row handle) is referenced.
    SearchableName,
}

impl DependencyCategory {
    /// Raw code of [`DependencyCategory::Package`].
    pub const PACKAGE_CODE: u8 = 0x1;
    /// Raw code of [`DependencyCategory::Manage`].
    pub const MANAGE_CODE: u8 = 0x2;
    /// Raw code of [`DependencyCategory::SearchableName`].
    pub const SEARCHABLE_NAME_CODE: u8 = 0x4;

    /// Decode a raw category code coming from an external index.
    ///
    /// Any other code means the index and this crate disagree about the
    /// category set, which is never silently reclassified.
    pub fn from_raw(code: u8) -> Result<Self> {
        match code {
            Self::PACKAGE_CODE => Ok(Self::Package),
            Self::MANAGE_CODE => Ok(Self::Manage),
            Self::SEARCHABLE_NAME_CODE => Ok(Self::SearchableName),
            other => {
                debug_assert!(false, "unexpected dependency category code {other}");
                Err(Error::UnexpectedCategory(other))
            }
        }
    }

    /// Raw code of this category.
    pub fn raw(self) -> u8 {
        match self {
            Self::Package => Self::PACKAGE_CODE,
            Self::Manage => Self::MANAGE_CODE,
            Self::SearchableName => Self::SEARCHABLE_NAME_CODE,
        }
    }

    /// Sort rank: package links first, then management, then searchable names.
    pub fn rank(self) -> u8 {
        match self {
            Self::Package => 0,
            Self::Manage => 1,
            Self::SearchableName => 2,
        }
    }
}

/// Property flags attached to a dependency edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyProperties {
    /// Must be loaded together with its owner.
    pub hard: bool,
    /// Needed at game runtime, not only in the editor.
    pub game: bool,
    /// Needed when cooking/building.
    pub build: bool,
    /// Direct (as opposed to inherited) management reference.
    pub direct: bool,
}

impl DependencyProperties {
    /// No properties set: a soft, editor-only link.
    pub const NONE: Self = Self {
        hard: false,
        game: false,
        build: false,
        direct: false,
    };

    /// Properties with the given hardness and game usage.
    pub const fn new(hard: bool, game: bool) -> Self {
        Self {
            hard,
            game,
            build: false,
            direct: false,
        }
    }

    /// Mark the link as a direct reference.
    pub const fn with_direct(mut self) -> Self {
        self.direct = true;
        self
    }

    /// Mark the link as needed for builds.
    pub const fn with_build(mut self) -> Self {
        self.build = true;
        self
    }
}

/// One edge reported by a provider: `asset_id` relates to the queried asset
/// through `category` with the given `properties`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetDependency {
    /// The asset on the far end of the edge.
    pub asset_id: AssetIdentifier,
    /// Relationship kind.
    pub category: DependencyCategory,
    /// Property flags.
    #[serde(default)]
    pub properties: DependencyProperties,
}

impl AssetDependency {
    /// Create a dependency record.
    pub fn new(
        asset_id: AssetIdentifier,
        category: DependencyCategory,
        properties: DependencyProperties,
    ) -> Self {
        Self {
            asset_id,
            category,
            properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_codes_round_trip() {
        for category in [
            DependencyCategory::Package,
            DependencyCategory::Manage,
            DependencyCategory::SearchableName,
        ] {
            assert_eq!(DependencyCategory::from_raw(category.raw()).ok(), Some(category));
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn unknown_raw_code_is_an_error() {
        assert!(matches!(
            DependencyCategory::from_raw(0x8),
            Err(Error::UnexpectedCategory(0x8))
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unexpected dependency category code")]
    fn unknown_raw_code_fails_fast_in_debug() {
        let _ = DependencyCategory::from_raw(0x8);
    }

    #[test]
    fn rank_order() {
        assert!(DependencyCategory::Package.rank() < DependencyCategory::Manage.rank());
        assert!(DependencyCategory::Manage.rank() < DependencyCategory::SearchableName.rank());
    }
}
