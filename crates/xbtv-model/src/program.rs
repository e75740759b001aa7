//! A single scheduled item.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of a schedule: where the media comes from and where it lives.
///
/// Programs are immutable once built; edits replace whole programs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Program {
    source: String,
    location: String,
}

impl Program {
    pub fn new(source: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            location: location.into(),
        }
    }

    /// Source identifier, e.g. `local` or `network`.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Location string, e.g. a path or URL.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.location)
    }
}
