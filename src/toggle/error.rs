//! Error taxonomy for toggle operations.

use std::error::Error;
use std::fmt;

use crate::domain::TargetKind;
use crate::read_model::ReadModelError;

/// Why a toggle or read-state query failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    /// No user in the session. Nothing was read or written.
    Unauthenticated,
    /// Malformed identifiers (empty ids and the like).
    Invalid(String),
    /// The question or answer does not exist (or was deleted concurrently).
    NotFound { kind: TargetKind, id: String },
    /// The store failed or kept losing races. Nothing was partially written.
    Store(ReadModelError),
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleError::Unauthenticated => write!(f, "authentication required"),
            ToggleError::Invalid(msg) => write!(f, "invalid request: {}", msg),
            ToggleError::NotFound { kind, id } => write!(f, "{} not found: {}", kind, id),
            ToggleError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ToggleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ToggleError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReadModelError> for ToggleError {
    fn from(err: ReadModelError) -> Self {
        ToggleError::Store(err)
    }
}
