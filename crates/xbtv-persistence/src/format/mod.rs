//! The `.xbtv` document format and the display rendering.

mod display;
mod document;

pub use display::display_schedule;
pub use document::{parse_schedule, serialize_schedule};

pub(crate) use document::parse_schedule_bytes;

/// Current format version.
///
/// Increment this when making breaking changes to the file format.
/// Files with version > FORMAT_VERSION are rejected.
pub const FORMAT_VERSION: u32 = 1;

/// Conventional extension for schedule files.
pub const FILE_EXTENSION: &str = "xbtv";
