//! The multi-buffer editing session.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use xbtv_model::{Program, Schedule};
use xbtv_persistence::{display_schedule, load_schedule};

use crate::buffer::Buffer;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::report::{BufferSaveResult, SaveAllReport, SaveOutcome};

/// A short description of one open buffer, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSummary {
    pub index: usize,
    pub name: String,
    pub path: Option<PathBuf>,
    pub dirty: bool,
    pub programs: usize,
    pub current: bool,
}

/// An editing session: a circular list of buffers with one of them current.
///
/// There is always at least one buffer. Content operations apply to the
/// current buffer.
#[derive(Debug)]
pub struct Application {
    buffers: Vec<Buffer>,
    current: usize,
    config: EngineConfig,
    /// Number of untitled buffers created so far, for naming.
    untitled: usize,
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    /// A session with one empty buffer.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mut app = Self {
            buffers: Vec::new(),
            current: 0,
            config,
            untitled: 0,
        };
        let first = app.untitled_buffer();
        app.buffers.push(first);
        app
    }

    // ---------------------------------------------------------------------
    // Buffer list
    // ---------------------------------------------------------------------

    /// Add an empty buffer after the current one and make it current.
    pub fn new_buffer(&mut self) {
        let buffer = self.untitled_buffer();
        self.current += 1;
        self.buffers.insert(self.current, buffer);
        debug!(index = self.current, name = %self.current_buffer_name(), "New buffer");
    }

    /// Move to the previous buffer, wrapping from the first to the last.
    pub fn prev_buffer(&mut self) {
        let len = self.buffers.len();
        self.current = (self.current + len - 1) % len;
        debug!(index = self.current, "Previous buffer");
    }

    /// Move to the next buffer, wrapping from the last to the first.
    pub fn next_buffer(&mut self) {
        self.current = (self.current + 1) % self.buffers.len();
        debug!(index = self.current, "Next buffer");
    }

    pub fn select_buffer(&mut self, index: usize) -> Result<()> {
        if index >= self.buffers.len() {
            return Err(EngineError::BufferIndex {
                index,
                len: self.buffers.len(),
            });
        }
        self.current = index;
        debug!(index, "Selected buffer");
        Ok(())
    }

    /// Close the current buffer without saving it and return it.
    ///
    /// The buffer to its left becomes current. Closing the only buffer
    /// leaves a fresh empty one in its place.
    pub fn close_buffer(&mut self) -> Buffer {
        let closed = self.buffers.remove(self.current);
        if self.buffers.is_empty() {
            let fresh = self.untitled_buffer();
            self.buffers.push(fresh);
        }
        self.current = self.current.saturating_sub(1);
        debug!(name = %closed.name(), dirty = closed.is_dirty(), "Closed buffer");
        closed
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_buffer(&self) -> &Buffer {
        &self.buffers[self.current]
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn summaries(&self) -> Vec<BufferSummary> {
        self.buffers
            .iter()
            .enumerate()
            .map(|(index, buffer)| BufferSummary {
                index,
                name: buffer.name().to_string(),
                path: buffer.path().map(Path::to_path_buf),
                dirty: buffer.is_dirty(),
                programs: buffer.programs().len(),
                current: index == self.current,
            })
            .collect()
    }

    /// True if any buffer has unsaved changes.
    pub fn any_modified(&self) -> bool {
        self.buffers.iter().any(Buffer::is_dirty)
    }

    pub fn current_modified(&self) -> bool {
        self.current_buffer().is_dirty()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_buffer().path()
    }

    // ---------------------------------------------------------------------
    // Current buffer content
    // ---------------------------------------------------------------------

    pub fn current_buffer_name(&self) -> &str {
        self.current_buffer().name()
    }

    pub fn set_current_buffer_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.current_mut().set_name(name)
    }

    pub fn add_program(&mut self, source: impl Into<String>, location: impl Into<String>) {
        self.current_mut().add_program(Program::new(source, location));
    }

    pub fn insert_program(
        &mut self,
        index: usize,
        source: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<()> {
        self.current_mut()
            .insert_program(index, Program::new(source, location))
    }

    pub fn remove_program(&mut self, index: usize) -> Result<Program> {
        self.current_mut().remove_program(index)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.current_mut().undo()
    }

    pub fn redo(&mut self) -> Result<()> {
        self.current_mut().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.current_buffer().history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.current_buffer().history().can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.current_buffer().history().undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.current_buffer().history().redo_depth()
    }

    /// Display rendering of the current buffer's programs.
    pub fn schedule_display(&self) -> String {
        display_schedule(self.current_buffer().schedule())
    }

    // ---------------------------------------------------------------------
    // Files
    // ---------------------------------------------------------------------

    /// Load `path` into a new buffer at the end of the list and select it.
    ///
    /// Nothing changes if the file cannot be read or parsed.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let schedule = load_schedule(path)?;
        let buffer = Buffer::opened(schedule, path, self.config.history_limit);
        self.buffers.push(buffer);
        self.current = self.buffers.len() - 1;
        info!(path = %path.display(), index = self.current, "Opened buffer");
        Ok(())
    }

    /// Save the current buffer to the file it is bound to.
    pub fn save(&mut self) -> Result<()> {
        self.current_mut().save()
    }

    /// Save the current buffer to `path` and bind it there.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.current_mut().save_as(path)
    }

    /// Save every modified buffer that has a file.
    ///
    /// A failure on one buffer does not stop the others; the report lists
    /// each modified buffer's outcome.
    pub fn save_all(&mut self) -> SaveAllReport {
        let mut report = SaveAllReport::default();

        for (index, buffer) in self.buffers.iter_mut().enumerate() {
            if !buffer.is_dirty() {
                continue;
            }

            let outcome = if buffer.path().is_none() {
                SaveOutcome::SkippedNoPath
            } else {
                match buffer.save() {
                    Ok(()) => SaveOutcome::Saved,
                    Err(error) => {
                        warn!(index, name = %buffer.name(), %error, "Failed to save buffer");
                        SaveOutcome::Failed(error)
                    }
                }
            };

            report.results.push(BufferSaveResult {
                index,
                name: buffer.name().to_string(),
                path: buffer.path().map(Path::to_path_buf),
                outcome,
            });
        }

        info!(
            saved = report.saved_count(),
            skipped = report.skipped_count(),
            failed = report.failed_count(),
            "Save all finished"
        );
        report
    }

    fn current_mut(&mut self) -> &mut Buffer {
        &mut self.buffers[self.current]
    }

    fn untitled_buffer(&mut self) -> Buffer {
        self.untitled += 1;
        let schedule = Schedule::untitled(&self.config.untitled_prefix, self.untitled);
        Buffer::new(schedule, self.config.history_limit)
    }
}
