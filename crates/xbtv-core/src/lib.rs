//! Editing engine for XBTV schedules.
//!
//! An [`Application`] holds a circular list of [`Buffer`]s, each one an open
//! schedule document with its own undo/redo [`History`] and unsaved-change
//! tracking. Files are read and written through `xbtv-persistence`.
//!
//! # Example
//!
//! ```ignore
//! use xbtv_core::Application;
//!
//! let mut app = Application::new();
//! app.add_program("local", "/foo/bar/baz");
//! assert!(app.any_modified());
//!
//! app.undo()?;
//! assert!(!app.any_modified());
//! ```
//!
//! # Undo Model
//!
//! Every edit (adding, inserting or removing a program, renaming) records the
//! whole schedule as it was before the edit. Undo and redo swap snapshots
//! between two stacks, and a new edit discards the redo stack. Dirty state is
//! recomputed against the program list at the last load or save, so undoing
//! back to the saved content makes a buffer clean again.

mod application;
mod buffer;
mod config;
mod dirty;
mod error;
mod history;
mod report;

pub use application::{Application, BufferSummary};
pub use buffer::Buffer;
pub use config::{DEFAULT_HISTORY_LIMIT, EngineConfig};
pub use dirty::DirtyTracker;
pub use error::{EngineError, Result};
pub use history::History;
pub use report::{BufferSaveResult, SaveAllReport, SaveOutcome};

// Re-export the value types callers need alongside the engine.
pub use xbtv_model::{ModelError, Program, Schedule};
