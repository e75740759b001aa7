//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::fmt;
use std::path::PathBuf;

use serde_json::error::Category;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize schedule")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not a valid schedule document.
    #[error("Invalid schedule file format: {path}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Unsupported format version.
    #[error("Schedule file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },
}

impl PersistenceError {
    /// True for filesystem-level failures, which a retry or user action may fix.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::AtomicWriteFailed { .. })
    }

    /// True when the file was read but its content could not be used.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. } | Self::UnsupportedVersion { .. }
        )
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Serialization { .. } => {
                "An error occurred while encoding the schedule.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::InvalidFormat { path, source } => {
                format!(
                    "The file at {} is not a valid schedule: {}",
                    path.display(),
                    source
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This schedule was written by a newer version of the editor \
                    (file version {}, this version supports up to {}).",
                    found, max_supported
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::InvalidFormat { .. } => {
                Some("Make sure you selected an .xbtv schedule file.".into())
            }
            Self::UnsupportedVersion { .. } => Some("Update the editor and try again.".into()),
        }
    }
}

/// A malformed schedule document, with the 1-based position of the problem.
///
/// `line` and `column` are 0 when the problem has no single position, such
/// as an unsupported version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
    pub message: String,
}

/// What went wrong while parsing a schedule document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Not well-formed JSON, including invalid UTF-8.
    Syntax,
    /// The document ends before it is complete.
    UnexpectedEof,
    /// Well-formed JSON that is not a schedule: missing or unknown fields,
    /// wrong value types, or a blank name.
    InvalidSchedule,
    UnsupportedVersion { found: u32, max_supported: u32 },
}

impl ParseError {
    pub(crate) fn unsupported_version(found: u32, max_supported: u32) -> Self {
        Self {
            line: 0,
            column: 0,
            kind: ParseErrorKind::UnsupportedVersion {
                found,
                max_supported,
            },
            message: format!("unsupported version {found} (maximum: {max_supported})"),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        let kind = match error.classify() {
            Category::Eof => ParseErrorKind::UnexpectedEof,
            Category::Data => ParseErrorKind::InvalidSchedule,
            Category::Syntax | Category::Io => ParseErrorKind::Syntax,
        };
        // serde_json appends the position to its message; it is kept separately.
        let text = error.to_string();
        let suffix = format!(" at line {} column {}", error.line(), error.column());
        let message = text.strip_suffix(&suffix).unwrap_or(&text).to_string();
        Self {
            line: error.line(),
            column: error.column(),
            kind,
            message,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            f.write_str(&self.message)
        } else {
            write!(
                f,
                "line {}, column {}: {}",
                self.line, self.column, self.message
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        let io = PersistenceError::Io {
            operation: "read",
            path: PathBuf::from("missing.xbtv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(io.is_io());
        assert!(!io.is_format());

        let format = PersistenceError::InvalidFormat {
            path: PathBuf::from("bad.xbtv"),
            source: ParseError {
                line: 2,
                column: 5,
                kind: ParseErrorKind::Syntax,
                message: "expected value".into(),
            },
        };
        assert!(format.is_format());
        assert!(!format.is_io());
        assert!(format.user_message().contains("line 2, column 5: expected value"));
    }

    #[test]
    fn serde_errors_keep_position_out_of_the_message() {
        let error = serde_json::from_str::<u32>("\n  true").unwrap_err();
        let parsed = ParseError::from(error);
        assert_eq!(parsed.kind, ParseErrorKind::InvalidSchedule);
        assert_eq!(parsed.line, 2);
        assert!(parsed.column > 0);
        assert!(!parsed.message.contains("at line"));
        assert_eq!(
            parsed.to_string(),
            format!("line 2, column {}: {}", parsed.column, parsed.message)
        );
    }

    #[test]
    fn unsupported_version_has_no_position() {
        let error = ParseError::unsupported_version(3, 1);
        assert_eq!(error.to_string(), "unsupported version 3 (maximum: 1)");
    }

    #[test]
    fn read_errors_suggest_checking_the_file() {
        let io = PersistenceError::Io {
            operation: "read",
            path: PathBuf::from("missing.xbtv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(io.suggestion().unwrap().contains("exists"));
    }
}
