//! Asset metadata as reported by a dependency provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PackageName;
use crate::link::LinearColor;

/// Class name of redirector assets.
pub const REDIRECTOR_CLASS: &str = "ObjectRedirector";

/// Class name of data table assets.
pub const DATA_TABLE_CLASS: &str = "DataTable";

/// Tag that overrides the displayed asset name.
pub const ACTOR_LABEL_TAG: &str = "ActorLabel";

/// Metadata describing one asset inside a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Package the asset lives in.
    pub package_name: PackageName,

    /// Name of the asset object.
    pub asset_name: String,

    /// Short class name of the asset (`Texture2D`, `ObjectRedirector`, ...).
    pub asset_class: String,

    /// Searchable tag/value pairs.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Display color associated with the asset type, if the host knows one.
    #[serde(default)]
    pub type_color: Option<LinearColor>,
}

impl AssetMetadata {
    /// Create metadata for an asset with no tags.
    pub fn new(
        package_name: impl Into<PackageName>,
        asset_name: impl Into<String>,
        asset_class: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            asset_name: asset_name.into(),
            asset_class: asset_class.into(),
            tags: BTreeMap::new(),
            type_color: None,
        }
    }

    /// Create the metadata of a redirector left behind in `package_name`.
    pub fn redirector(package_name: impl Into<PackageName>, asset_name: impl Into<String>) -> Self {
        Self::new(package_name, asset_name, REDIRECTOR_CLASS)
    }

    /// Attach a tag value.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Attach a type color.
    pub fn with_type_color(mut self, color: LinearColor) -> Self {
        self.type_color = Some(color);
        self
    }

    /// Whether this asset forwards references to a renamed/moved asset.
    pub fn is_redirector(&self) -> bool {
        self.asset_class == REDIRECTOR_CLASS
    }

    /// Look up a tag value.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// On-disk information about a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDiskInfo {
    /// Size in bytes. Negative sizes mark packages whose data is unusable.
    pub disk_size: i64,
}

impl PackageDiskInfo {
    /// Whether the package has usable data on disk.
    pub fn is_valid(&self) -> bool {
        self.disk_size >= 0
    }
}
