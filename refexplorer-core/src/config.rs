//! Explorer Configuration
//!
//! Settings are plain serde structs. Every field has a default, so a
//! configuration document only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::Position;

/// How children are fanned out around their parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// Children stack to the left of the parent, the outer ones further
    /// away, spread vertically over a half circle.
    #[default]
    Stacked,
    /// Children sit on a half circle centered on the parent.
    Symmetric,
}

/// Radial layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between stacked rows.
    pub width_step: i32,
    /// Minimum distance between neighboring children.
    pub height_step: i32,
    /// Placement policy.
    pub policy: LayoutPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width_step: 256,
            height_step: 400,
            policy: LayoutPolicy::default(),
        }
    }
}

/// Top-level explorer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Layout settings.
    pub layout: LayoutConfig,

    /// Position of the root node.
    pub root_origin: Position,

    /// Number of referencer levels expanded from the root. Zero shows the
    /// root alone.
    pub search_depth: usize,

    /// Keep only the first N links of each node, most important first.
    pub max_breadth: Option<usize>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            root_origin: Position::default(),
            search_depth: 1,
            max_breadth: None,
        }
    }
}

impl ExplorerConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
