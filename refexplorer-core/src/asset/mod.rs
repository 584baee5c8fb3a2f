//! Asset Values
//!
//! Value types that name graph nodes and describe the assets behind them.
//! Everything here is plain data; lookups go through a
//! [`DependencyProvider`](crate::provider::DependencyProvider).

mod identifier;
mod metadata;

pub use identifier::{AssetIdentifier, PackageName};
pub use metadata::{
    AssetMetadata, PackageDiskInfo, ACTOR_LABEL_TAG, DATA_TABLE_CLASS, REDIRECTOR_CLASS,
};
