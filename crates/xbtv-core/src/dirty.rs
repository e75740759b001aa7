//! Unsaved-change tracking.

use xbtv_model::Program;

/// Tracks whether a buffer differs from its save point.
///
/// The save point is the program list as last loaded or saved. Dirty state is
/// recomputed against it after every change, so undoing back to the saved
/// content makes the buffer clean again.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    /// Program list at the last load or save.
    saved: Vec<Program>,

    /// Whether the current content differs from `saved`.
    dirty: bool,
}

impl DirtyTracker {
    /// Start clean, with `programs` as the save point.
    pub fn new(programs: &[Program]) -> Self {
        Self {
            saved: programs.to_vec(),
            dirty: false,
        }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute dirty state after the content changed.
    pub fn update(&mut self, programs: &[Program]) {
        self.dirty = programs != self.saved.as_slice();
    }

    /// Mark that a save of `programs` completed successfully.
    pub fn save_complete(&mut self, programs: &[Program]) {
        self.saved = programs.to_vec();
        self.dirty = false;
    }
}
