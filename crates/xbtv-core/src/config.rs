//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default cap on the undo history of a single buffer: unbounded, so every
/// state back to the last load stays reachable.
pub const DEFAULT_HISTORY_LIMIT: usize = 0;

/// Tunables for an [`Application`](crate::Application).
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial settings file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix for the names of new buffers: `<prefix>-1`, `<prefix>-2`, ...
    pub untitled_prefix: String,

    /// Maximum number of undo steps kept per buffer. Zero (the default)
    /// means unbounded.
    ///
    /// When a limit is set and reached, the oldest step is discarded and the
    /// states before it can no longer be restored.
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            untitled_prefix: "untitled".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
