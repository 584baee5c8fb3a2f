//! Asset Identifiers
//!
//! An identifier names one node of the reference graph: a package, a
//! searchable value living inside a package, or a managed (primary) asset.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Path-like name of a package, e.g. `/Game/Props/Chair`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Create a package name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The full package path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment (`/Game/Props/Chair` -> `Chair`).
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Whether this is a native code package (`/Script/...`).
    pub fn is_script(&self) -> bool {
        self.0.starts_with("/Script")
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PackageName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Identity of a node in the reference graph.
///
/// Equality, hashing and ordering are structural over all fields, so an
/// identifier can be used directly as a map key and sorts deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetIdentifier {
    /// A whole package.
    Package {
        /// Package path.
        package: PackageName,
    },

    /// A searchable name (gameplay tag, data table row handle, ...) owned by
    /// an object inside a package.
    Value {
        /// Package containing the owning object.
        package: PackageName,
        /// Name of the object that owns the value.
        object: String,
        /// The value itself.
        value: String,
    },

    /// An asset tracked by the asset-management layer under a (type, name) key.
    PrimaryAsset {
        /// Primary asset type.
        asset_type: String,
        /// Primary asset name.
        name: String,
    },
}

impl AssetIdentifier {
    /// Identifier of a package.
    pub fn package(package: impl Into<PackageName>) -> Self {
        Self::Package {
            package: package.into(),
        }
    }

    /// Identifier of a searchable value.
    pub fn value(
        package: impl Into<PackageName>,
        object: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Value {
            package: package.into(),
            object: object.into(),
            value: value.into(),
        }
    }

    /// Identifier of a primary (managed) asset.
    pub fn primary_asset(asset_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::PrimaryAsset {
            asset_type: asset_type.into(),
            name: name.into(),
        }
    }

    /// The package this identifier lives in, if any.
    ///
    /// Primary assets are not tied to a package and return `None`.
    pub fn package_name(&self) -> Option<&PackageName> {
        match self {
            Self::Package { package } | Self::Value { package, .. } => Some(package),
            Self::PrimaryAsset { .. } => None,
        }
    }

    /// Whether this identifier names a whole package.
    pub fn is_package(&self) -> bool {
        matches!(self, Self::Package { .. })
    }

    /// Whether this identifier names a searchable value.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value { .. })
    }

    /// Whether this identifier names a primary asset.
    pub fn is_primary_asset(&self) -> bool {
        matches!(self, Self::PrimaryAsset { .. })
    }

    /// Case-insensitive comparison on package names; identifiers without a
    /// package sort as if their package name were empty.
    pub fn cmp_package_name(&self, other: &Self) -> Ordering {
        let lhs = self.package_name().map(PackageName::as_str).unwrap_or("");
        let rhs = other.package_name().map(PackageName::as_str).unwrap_or("");
        lhs.chars()
            .flat_map(char::to_lowercase)
            .cmp(rhs.chars().flat_map(char::to_lowercase))
    }
}

impl fmt::Display for AssetIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package { package } => write!(f, "{}", package),
            Self::Value {
                package,
                object,
                value,
            } => write!(f, "{}.{}::{}", package, object, value),
            Self::PrimaryAsset { asset_type, name } => write!(f, "{}:{}", asset_type, name),
        }
    }
}

impl From<PackageName> for AssetIdentifier {
    fn from(package: PackageName) -> Self {
        Self::Package { package }
    }
}
