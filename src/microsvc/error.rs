//! Error types for microsvc command handlers.

use std::error::Error;
use std::fmt;

use crate::read_model::ReadModelError;
use crate::toggle::ToggleError;

/// Error type for command handler operations.
#[derive(Debug)]
pub enum HandlerError {
    /// No handler registered for this command name.
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    DecodeFailed(String),
    /// Guard rejected the command (input validation failed).
    GuardRejected(String),
    /// Well-formed payload with unusable values.
    Invalid(String),
    /// Question or answer not found.
    NotFound(String),
    /// No signed-in user.
    Unauthorized(String),
    /// Store failure; the user may try again.
    Store(ReadModelError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::GuardRejected(name) => write!(f, "guard rejected command: {}", name),
            HandlerError::Invalid(msg) => write!(f, "invalid request: {}", msg),
            HandlerError::NotFound(what) => write!(f, "not found: {}", what),
            HandlerError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            HandlerError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ToggleError> for HandlerError {
    fn from(err: ToggleError) -> Self {
        match err {
            ToggleError::Unauthenticated => {
                HandlerError::Unauthorized("please log in to continue".into())
            }
            ToggleError::Invalid(msg) => HandlerError::Invalid(msg),
            ToggleError::NotFound { kind, id } => HandlerError::NotFound(format!("{} {}", kind, id)),
            ToggleError::Store(e) => HandlerError::Store(e),
        }
    }
}

impl From<ReadModelError> for HandlerError {
    fn from(err: ReadModelError) -> Self {
        HandlerError::Store(err)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Invalid(_) => 400,
            HandlerError::NotFound(_) => 404,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Store(_) => 500,
        }
    }
}
