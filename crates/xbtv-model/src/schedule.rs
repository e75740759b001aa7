//! Named, ordered program lists.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::program::Program;

/// A schedule document's content: its name and its programs in play order.
///
/// This is also the snapshot type used for undo/redo, since it captures
/// everything needed to restore a buffer exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct Schedule {
    name: String,
    programs: Vec<Program>,
}

/// Unchecked deserialized form; converted through [`Schedule::with_programs`]
/// so a blank name is rejected.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchedule {
    name: String,
    programs: Vec<Program>,
}

impl TryFrom<RawSchedule> for Schedule {
    type Error = ModelError;

    fn try_from(raw: RawSchedule) -> Result<Self> {
        Self::with_programs(raw.name, raw.programs)
    }
}

/// Check that `name` is usable as a schedule name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ModelError::EmptyName);
    }
    Ok(())
}

impl Schedule {
    /// Create an empty schedule.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_programs(name, Vec::new())
    }

    /// Create an empty schedule named `<prefix>-<number>`.
    ///
    /// The generated name always carries the number, so it is never blank.
    pub fn untitled(prefix: &str, number: usize) -> Self {
        Self {
            name: format!("{prefix}-{number}"),
            programs: Vec::new(),
        }
    }

    /// Create a schedule with an initial program list.
    pub fn with_programs(name: impl Into<String>, programs: Vec<Program>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, programs })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn program(&self, index: usize) -> Option<&Program> {
        self.programs.get(index)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Append a program at the end of the schedule.
    pub fn push(&mut self, program: Program) {
        self.programs.push(program);
    }

    /// Insert a program before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, program: Program) -> Result<()> {
        if index > self.programs.len() {
            return Err(ModelError::IndexOutOfRange {
                index,
                len: self.programs.len(),
            });
        }
        self.programs.insert(index, program);
        Ok(())
    }

    /// Remove and return the program at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Program> {
        if index >= self.programs.len() {
            return Err(ModelError::IndexOutOfRange {
                index,
                len: self.programs.len(),
            });
        }
        Ok(self.programs.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_names() {
        assert_eq!(Schedule::new(""), Err(ModelError::EmptyName));
        assert_eq!(Schedule::new("  \t"), Err(ModelError::EmptyName));

        let mut schedule = Schedule::new("Evening").unwrap();
        assert_eq!(schedule.set_name(""), Err(ModelError::EmptyName));
        assert_eq!(schedule.name(), "Evening");
    }

    #[test]
    fn untitled_names_are_numbered() {
        assert_eq!(Schedule::untitled("untitled", 3).name(), "untitled-3");
        assert_eq!(Schedule::untitled("", 1).name(), "-1");
    }

    #[test]
    fn insert_allows_append_position() {
        let mut schedule = Schedule::new("Evening").unwrap();
        schedule.push(Program::new("local", "/a"));
        schedule.insert(1, Program::new("local", "/b")).unwrap();
        schedule.insert(0, Program::new("local", "/c")).unwrap();

        let locations: Vec<&str> = schedule.programs().iter().map(Program::location).collect();
        assert_eq!(locations, vec!["/c", "/a", "/b"]);
    }

    #[test]
    fn out_of_range_edits_leave_schedule_untouched() {
        let mut schedule = Schedule::new("Evening").unwrap();
        schedule.push(Program::new("local", "/a"));

        assert_eq!(
            schedule.insert(3, Program::new("local", "/b")),
            Err(ModelError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            schedule.remove(1),
            Err(ModelError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(schedule.len(), 1);
    }
}
