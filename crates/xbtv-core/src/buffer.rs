//! A single schedule document being edited.

use std::path::{Path, PathBuf};

use tracing::debug;
use xbtv_model::{Program, Schedule};
use xbtv_persistence::save_schedule;

use crate::dirty::DirtyTracker;
use crate::error::{EngineError, Result};
use crate::history::History;

/// One open schedule: its content, the file it is bound to, its undo history
/// and its unsaved-change state.
///
/// Every content change goes through a method here, which records the prior
/// state in the history and refreshes the dirty flag.
#[derive(Debug, Clone)]
pub struct Buffer {
    schedule: Schedule,
    path: Option<PathBuf>,
    history: History,
    tracker: DirtyTracker,
}

impl Buffer {
    /// A buffer that is not bound to any file.
    pub fn new(schedule: Schedule, history_limit: usize) -> Self {
        let tracker = DirtyTracker::new(schedule.programs());
        Self {
            schedule,
            path: None,
            history: History::new(history_limit),
            tracker,
        }
    }

    /// A buffer loaded from `path`. It starts clean with an empty history.
    pub fn opened(schedule: Schedule, path: impl Into<PathBuf>, history_limit: usize) -> Self {
        let mut buffer = Self::new(schedule, history_limit);
        buffer.path = Some(path.into());
        buffer
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn name(&self) -> &str {
        self.schedule.name()
    }

    pub fn programs(&self) -> &[Program] {
        self.schedule.programs()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Rename the schedule. Undoable, but the name alone never makes the
    /// buffer dirty.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.edit(|schedule| schedule.set_name(name))?;
        debug!(name = %self.name(), "Renamed buffer");
        Ok(())
    }

    /// Append a program.
    pub fn add_program(&mut self, program: Program) {
        let before = self.schedule.clone();
        self.schedule.push(program);
        self.commit(before);
        debug!(buffer = %self.name(), programs = self.schedule.len(), "Added program");
    }

    /// Insert a program before `index`; `index == len` appends.
    pub fn insert_program(&mut self, index: usize, program: Program) -> Result<()> {
        self.edit(|schedule| schedule.insert(index, program))?;
        debug!(buffer = %self.name(), index, "Inserted program");
        Ok(())
    }

    pub fn remove_program(&mut self, index: usize) -> Result<Program> {
        let removed = self.edit(|schedule| schedule.remove(index))?;
        debug!(buffer = %self.name(), index, "Removed program");
        Ok(removed)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.schedule)?;
        self.tracker.update(self.schedule.programs());
        debug!(buffer = %self.name(), dirty = self.is_dirty(), "Undo");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.schedule)?;
        self.tracker.update(self.schedule.programs());
        debug!(buffer = %self.name(), dirty = self.is_dirty(), "Redo");
        Ok(())
    }

    /// Write the buffer to the file it is bound to.
    ///
    /// History is kept; only the save point moves.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or_else(|| EngineError::NoPath {
            name: self.name().to_string(),
        })?;
        self.write_to(&path)
    }

    /// Write the buffer to `path` and bind it there.
    ///
    /// On failure the previous binding is kept.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        save_schedule(&self.schedule, path)?;
        self.tracker.save_complete(self.schedule.programs());
        debug!(buffer = %self.name(), path = %path.display(), "Bound buffer to saved file");
        Ok(())
    }

    /// Apply a fallible edit to a copy of the schedule and keep it only if it
    /// succeeds, so a rejected edit changes nothing. An edit that leaves the
    /// schedule as it was records no history.
    fn edit<T>(
        &mut self,
        apply: impl FnOnce(&mut Schedule) -> xbtv_model::Result<T>,
    ) -> Result<T> {
        let mut next = self.schedule.clone();
        let output = apply(&mut next)?;
        if next == self.schedule {
            return Ok(output);
        }
        let before = std::mem::replace(&mut self.schedule, next);
        self.commit(before);
        Ok(output)
    }

    fn commit(&mut self, before: Schedule) {
        self.history.record(before);
        self.tracker.update(self.schedule.programs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbtv_model::ModelError;

    fn untitled() -> Buffer {
        Buffer::new(Schedule::untitled("untitled", 1), 100)
    }

    #[test]
    fn add_program_marks_dirty_and_is_undoable() {
        let mut buffer = untitled();
        buffer.add_program(Program::new("local", "/foo/bar/baz"));
        assert!(buffer.is_dirty());
        assert_eq!(buffer.history().undo_depth(), 1);

        buffer.undo().unwrap();
        assert!(buffer.programs().is_empty());
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn rename_is_undoable_but_not_dirty() {
        let mut buffer = untitled();
        buffer.set_name("Morning").unwrap();
        assert_eq!(buffer.name(), "Morning");
        assert!(!buffer.is_dirty());

        buffer.undo().unwrap();
        assert_eq!(buffer.name(), "untitled-1");
        buffer.redo().unwrap();
        assert_eq!(buffer.name(), "Morning");
    }

    #[test]
    fn renaming_to_the_same_name_records_nothing() {
        let mut buffer = untitled();
        buffer.set_name("untitled-1").unwrap();

        assert_eq!(buffer.history().undo_depth(), 0);
        assert!(matches!(buffer.undo(), Err(EngineError::NothingToUndo)));

        buffer.set_name("Evening").unwrap();
        buffer.set_name("Evening").unwrap();
        assert_eq!(buffer.history().undo_depth(), 1);
        buffer.undo().unwrap();
        assert_eq!(buffer.name(), "untitled-1");
    }

    #[test]
    fn rejected_edits_change_nothing() {
        let mut buffer = untitled();
        buffer.add_program(Program::new("local", "/a"));

        let err = buffer.set_name("   ").unwrap_err();
        assert!(matches!(err, EngineError::Model(ModelError::EmptyName)));

        let err = buffer
            .insert_program(5, Program::new("local", "/b"))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Model(ModelError::IndexOutOfRange { index: 5, len: 1 })
        ));
        assert!(buffer.remove_program(1).is_err());

        assert_eq!(buffer.name(), "untitled-1");
        assert_eq!(buffer.programs().len(), 1);
        assert_eq!(buffer.history().undo_depth(), 1);
    }

    #[test]
    fn insert_and_remove_keep_order() {
        let mut buffer = untitled();
        buffer.add_program(Program::new("local", "/a"));
        buffer.add_program(Program::new("local", "/c"));
        buffer.insert_program(1, Program::new("local", "/b")).unwrap();

        let locations: Vec<_> = buffer.programs().iter().map(|p| p.location()).collect();
        assert_eq!(locations, ["/a", "/b", "/c"]);

        let removed = buffer.remove_program(0).unwrap();
        assert_eq!(removed.location(), "/a");
        buffer.undo().unwrap();
        assert_eq!(buffer.programs()[0].location(), "/a");
    }

    #[test]
    fn save_without_path_fails() {
        let mut buffer = untitled();
        buffer.add_program(Program::new("local", "/a"));

        let err = buffer.save().unwrap_err();
        assert!(err.is_no_path());
        assert!(buffer.is_dirty());
    }

    #[test]
    fn save_as_binds_path_and_keeps_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evening.xbtv");
        let mut buffer = untitled();
        buffer.add_program(Program::new("local", "/a"));

        buffer.save_as(&path).unwrap();
        assert_eq!(buffer.path(), Some(path.as_path()));
        assert!(!buffer.is_dirty());
        assert!(buffer.history().can_undo());

        // Undoing past the save point makes the buffer dirty again.
        buffer.undo().unwrap();
        assert!(buffer.is_dirty());
        buffer.save().unwrap();
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn failed_save_as_keeps_previous_binding() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.xbtv");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut buffer = untitled();
        buffer.save_as(&good).unwrap();
        buffer.add_program(Program::new("local", "/a"));

        let err = buffer.save_as(&blocker.join("bad.xbtv")).unwrap_err();
        assert!(err.is_io());
        assert_eq!(buffer.path(), Some(good.as_path()));
        assert!(buffer.is_dirty());
    }
}
