//! Engine error types.

use thiserror::Error;
use xbtv_model::ModelError;
use xbtv_persistence::PersistenceError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors returned by [`Application`](crate::Application) and
/// [`Buffer`](crate::Buffer) operations.
///
/// None of these are fatal: every failing operation leaves the engine in the
/// state it was in before the call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Reading or writing a schedule file failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A rejected name or program index.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// `save` on a buffer that was never opened from or saved to a file.
    #[error("buffer '{name}' has no file yet; use save as")]
    NoPath { name: String },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("buffer {index} does not exist ({len} open)")]
    BufferIndex { index: usize, len: usize },
}

impl EngineError {
    /// Filesystem-level failure; retrying or fixing permissions may help.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Persistence(err) if err.is_io())
    }

    /// The file was read but is not a usable schedule.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Persistence(err) if err.is_format())
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPath { .. })
    }

    /// Undo or redo ran off the end of the history. Benign.
    pub fn is_history_boundary(&self) -> bool {
        matches!(self, Self::NothingToUndo | Self::NothingToRedo)
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence(err) => err.user_message(),
            Self::Model(ModelError::EmptyName) => "A schedule name cannot be empty.".into(),
            Self::Model(ModelError::IndexOutOfRange { index, len }) => {
                format!(
                    "There is no program {} (the schedule has {}).",
                    index + 1,
                    len
                )
            }
            Self::NoPath { name } => {
                format!("'{name}' has never been saved. Use save as to choose a file.")
            }
            Self::NothingToUndo => "Nothing to undo.".into(),
            Self::NothingToRedo => "Nothing to redo.".into(),
            Self::BufferIndex { index, len } => {
                format!("There is no buffer {} ({} open).", index + 1, len)
            }
        }
    }

    /// Get a suggestion for how to resolve this error, if there is one.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Persistence(err) => err.suggestion(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn classification() {
        let io = EngineError::from(PersistenceError::Io {
            operation: "read",
            path: PathBuf::from("/missing.xbtv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });
        assert!(io.is_io());
        assert!(!io.is_format());
        assert!(io.suggestion().is_some());

        let no_path = EngineError::NoPath {
            name: "untitled-1".into(),
        };
        assert!(no_path.is_no_path());
        assert!(no_path.user_message().contains("untitled-1"));
        assert!(no_path.to_string().contains("save as"));

        assert!(EngineError::NothingToUndo.is_history_boundary());
        assert!(EngineError::NothingToRedo.is_history_boundary());
        assert!(!EngineError::from(ModelError::EmptyName).is_history_boundary());
    }

    #[test]
    fn indices_are_reported_one_based() {
        let err = EngineError::BufferIndex { index: 4, len: 2 };
        assert_eq!(err.user_message(), "There is no buffer 5 (2 open).");
    }
}
