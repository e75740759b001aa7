//! Schedule loading operations.

use std::fs;
use std::path::Path;

use xbtv_model::Schedule;

use crate::error::{ParseErrorKind, PersistenceError, Result};
use crate::format::parse_schedule_bytes;

/// Load a schedule from a file.
pub fn load_schedule(path: &Path) -> Result<Schedule> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let schedule = parse_schedule_bytes(&bytes).map_err(|e| match e.kind {
        ParseErrorKind::UnsupportedVersion {
            found,
            max_supported,
        } => PersistenceError::UnsupportedVersion {
            found,
            max_supported,
            path: path.to_path_buf(),
        },
        _ => PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    tracing::info!(
        path = %path.display(),
        programs = schedule.len(),
        "loaded schedule"
    );
    Ok(schedule)
}
