//! Persistent storage for XBTV schedules.
//!
//! This crate converts [`Schedule`](xbtv_model::Schedule) values to and from
//! `.xbtv` files, and renders them as plain text for display.
//!
//! # Features
//!
//! - **Lossless round trip**: `load(save(s)) == s` for every schedule
//! - **Atomic writes** to prevent data corruption
//! - **Versioned documents**: files from a newer editor are refused cleanly
//! - **Positioned errors**: malformed files report line and column
//!
//! # File Format
//!
//! `.xbtv` files are UTF-8 JSON documents, encoded with `serde_json`:
//!
//! ```text
//! {
//!   "version": 1,
//!   "schedule": {
//!     "name": "Evening block",
//!     "programs": [
//!       { "source": "local", "location": "/foo/bar/baz" },
//!       { "source": "network", "location": "http://example.com/stream" }
//!     ]
//!   }
//! }
//! ```
//!
//! `version` is checked before anything else. Unknown fields and blank
//! names are rejected.
//!
//! # Example
//!
//! ```ignore
//! use xbtv_model::{Program, Schedule};
//! use xbtv_persistence::{load_schedule, save_schedule};
//!
//! let mut schedule = Schedule::new("Evening")?;
//! schedule.push(Program::new("local", "/foo/bar/baz"));
//!
//! save_schedule(&schedule, Path::new("evening.xbtv"))?;
//! let loaded = load_schedule(Path::new("evening.xbtv"))?;
//! assert_eq!(loaded, schedule);
//! ```
//!
//! # Architecture
//!
//! - `format/` - Document envelope (serde) and display rendering
//! - `io/` - File I/O operations (atomic save, load)
//! - `error.rs` - Error types with user-friendly messages

mod error;
mod format;
mod io;

pub use error::{ParseError, ParseErrorKind, PersistenceError, Result};
pub use format::{
    FILE_EXTENSION, FORMAT_VERSION, display_schedule, parse_schedule, serialize_schedule,
};
pub use io::{load_schedule, save_schedule};
