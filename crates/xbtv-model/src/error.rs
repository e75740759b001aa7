use thiserror::Error;

/// Errors raised when a schedule edit would break a model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("schedule name must not be empty")]
    EmptyName,
    #[error("program index {index} is out of range (schedule has {len} programs)")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
