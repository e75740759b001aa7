//! Value types for XBTV schedule documents.
//!
//! A [`Schedule`] is a named, ordered list of [`Program`]s. It is the unit
//! the editor engine snapshots for undo/redo and the unit the persistence
//! layer reads and writes.

pub mod error;
pub mod program;
pub mod schedule;

pub use error::{ModelError, Result};
pub use program::Program;
pub use schedule::{Schedule, validate_name};
