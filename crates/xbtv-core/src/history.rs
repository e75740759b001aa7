//! Linear undo/redo over whole-schedule snapshots.

use xbtv_model::Schedule;

use crate::error::{EngineError, Result};

/// Undo and redo stacks for one buffer.
///
/// `past` holds the states before each edit (most recent last) and `future`
/// the states undone since the last edit. Recording a new edit clears
/// `future`.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Schedule>,
    future: Vec<Schedule>,
    /// Zero means unbounded.
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit,
        }
    }

    /// Record the state a buffer had before an edit.
    pub fn record(&mut self, before: Schedule) {
        self.past.push(before);
        self.future.clear();

        if self.limit > 0 && self.past.len() > self.limit {
            let excess = self.past.len() - self.limit;
            self.past.drain(..excess);
        }
    }

    /// Step back: `current` is replaced by the most recent past state and
    /// pushed onto the redo stack.
    pub fn undo(&mut self, current: &mut Schedule) -> Result<()> {
        let previous = self.past.pop().ok_or(EngineError::NothingToUndo)?;
        let replaced = std::mem::replace(current, previous);
        self.future.push(replaced);
        Ok(())
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &mut Schedule) -> Result<()> {
        let next = self.future.pop().ok_or(EngineError::NothingToRedo)?;
        let replaced = std::mem::replace(current, next);
        self.past.push(replaced);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbtv_model::Program;

    fn schedule_with(count: usize) -> Schedule {
        let programs = (0..count)
            .map(|i| Program::new("local", format!("/media/{i}")))
            .collect();
        Schedule::with_programs("history", programs).unwrap()
    }

    #[test]
    fn undo_on_empty_history_leaves_state_alone() {
        let mut history = History::new(10);
        let mut current = schedule_with(2);

        let err = history.undo(&mut current).unwrap_err();

        assert!(matches!(err, EngineError::NothingToUndo));
        assert_eq!(current, schedule_with(2));
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn undo_then_redo_swaps_states() {
        let mut history = History::new(10);
        let mut current = schedule_with(1);
        history.record(schedule_with(0));

        history.undo(&mut current).unwrap();
        assert_eq!(current, schedule_with(0));
        assert!(!history.can_undo());
        assert!(history.can_redo());

        history.redo(&mut current).unwrap();
        assert_eq!(current, schedule_with(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn recording_clears_redo() {
        let mut history = History::new(10);
        let mut current = schedule_with(1);
        history.record(schedule_with(0));
        history.undo(&mut current).unwrap();
        assert_eq!(history.redo_depth(), 1);

        history.record(current.clone());

        assert_eq!(history.redo_depth(), 0);
        assert!(matches!(
            history.redo(&mut current),
            Err(EngineError::NothingToRedo)
        ));
    }

    #[test]
    fn limit_discards_oldest() {
        let mut history = History::new(3);
        for count in 0..5 {
            history.record(schedule_with(count));
        }
        assert_eq!(history.undo_depth(), 3);

        let mut current = schedule_with(5);
        for _ in 0..3 {
            history.undo(&mut current).unwrap();
        }
        assert_eq!(current, schedule_with(2));
        assert!(!history.can_undo());
    }

    #[test]
    fn zero_limit_is_unbounded() {
        let mut history = History::new(0);
        for count in 0..250 {
            history.record(schedule_with(count % 3));
        }
        assert_eq!(history.undo_depth(), 250);
    }
}
