//! Numeric depth/width budgets consumed by the synthesizers.

use serde::{Deserialize, Serialize};

/// Depth/width budget for the synthesized operation document's selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionLimits {
    /// How many composite levels to expand before truncating to minimal
    /// leaf selections. Depth 0 still yields a valid (minimal) selection.
    pub depth: u32,
    /// Max fields kept per object/interface level (and max union members).
    pub max_fields: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            depth: 1,
            max_fields: 20,
        }
    }
}

/// Depth/width budget for the synthesized return tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnTreeLimits {
    /// Composite hops to expand before emitting truncated nodes. List and
    /// non-null wrappers do not consume depth.
    pub depth: u32,
    pub max_fields: usize,
}

impl Default for ReturnTreeLimits {
    fn default() -> Self {
        Self {
            depth: 2,
            max_fields: 25,
        }
    }
}

/// The full configuration surface the engine consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateLimits {
    pub selection: SelectionLimits,
    pub return_tree: ReturnTreeLimits,
}
