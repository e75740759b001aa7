//! Outcome of saving every modified buffer at once.

use std::path::PathBuf;

use crate::error::EngineError;

/// What happened to one buffer during a save-all.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    /// The buffer has never been bound to a file; it stays dirty.
    SkippedNoPath,
    /// The write failed; the buffer stays dirty.
    Failed(EngineError),
}

/// The save-all result for a single buffer.
#[derive(Debug)]
pub struct BufferSaveResult {
    /// Position of the buffer in the application's list.
    pub index: usize,
    pub name: String,
    pub path: Option<PathBuf>,
    pub outcome: SaveOutcome,
}

/// Per-buffer outcomes of a save-all, in buffer order.
///
/// Only buffers that were dirty are listed; clean buffers are not touched.
#[derive(Debug, Default)]
pub struct SaveAllReport {
    pub results: Vec<BufferSaveResult>,
}

impl SaveAllReport {
    /// True when every modified buffer was written.
    pub fn is_success(&self) -> bool {
        self.results
            .iter()
            .all(|result| matches!(result.outcome, SaveOutcome::Saved))
    }

    pub fn saved_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, SaveOutcome::Saved))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, SaveOutcome::SkippedNoPath))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, SaveOutcome::Failed(_)))
    }

    /// Buffers that still have unsaved changes after the save-all.
    pub fn unsaved(&self) -> impl Iterator<Item = &BufferSaveResult> {
        self.results
            .iter()
            .filter(|result| !matches!(result.outcome, SaveOutcome::Saved))
    }

    fn count(&self, predicate: impl Fn(&SaveOutcome) -> bool) -> usize {
        self.results
            .iter()
            .filter(|result| predicate(&result.outcome))
            .count()
    }
}
