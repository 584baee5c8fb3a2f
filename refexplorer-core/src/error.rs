//! Error Types
//!
//! Graph construction itself has no failure modes: empty referencer sets and
//! unresolvable packages are normal outcomes. Errors only come from the
//! edges of the crate (configuration, snapshot encoding) and from invariant
//! checks that are reported instead of panicking.

use thiserror::Error;

use crate::asset::AssetIdentifier;

/// Errors produced by the reference explorer core.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a configuration or index file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or index document could not be parsed.
    #[error("invalid document: {0}")]
    Config(#[source] serde_json::Error),

    /// Encoding a graph snapshot as JSON failed.
    #[error("failed to encode graph as json: {0}")]
    Json(#[source] serde_json::Error),

    /// Encoding a graph snapshot as MessagePack failed.
    #[error("failed to encode graph as msgpack: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// A raw dependency category code outside Package/Manage/SearchableName.
    #[error("unexpected dependency category code {0}")]
    UnexpectedCategory(u8),

    /// The operation needs a graph root and none has been set.
    #[error("no graph root has been set")]
    RootNotSet,

    /// A node was referenced that is not present in the node table.
    #[error("node {0} is not present in the node table")]
    MissingNode(AssetIdentifier),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
