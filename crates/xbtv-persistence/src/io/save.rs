//! Schedule saving operations.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use xbtv_model::Schedule;

use crate::error::{PersistenceError, Result};
use crate::format::serialize_schedule;

/// Save a schedule to a file.
///
/// Uses atomic write (temp file + rename) so an interrupted save never
/// leaves a half-written schedule behind.
pub fn save_schedule(schedule: &Schedule, path: &Path) -> Result<()> {
    let temp_path = temp_path_for(path)?;
    let content = serialize_schedule(schedule)?;

    // Create parent directory if needed
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    if let Err(error) = write_temp(&temp_path, content.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    // Atomic rename
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(PersistenceError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source: e,
        });
    }

    tracing::info!(
        path = %path.display(),
        programs = schedule.len(),
        "saved schedule"
    );
    Ok(())
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })
}

/// `<dir>/<file name>.tmp`, next to the target so the rename stays on one filesystem.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let Some(file_name) = path.file_name() else {
        return Err(PersistenceError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path does not name a file",
            ),
        });
    };
    let mut temp_name = OsString::from(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}
