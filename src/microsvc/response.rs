//! The `{ success, data?, error? }` envelope every command answers with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::HandlerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse<T = Value> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ActionResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                message: message.into(),
            }),
        }
    }

    /// The error message, or a generic one when the body carried none.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "An error occurred".to_string())
    }
}

impl From<Result<Value, HandlerError>> for ActionResponse {
    fn from(result: Result<Value, HandlerError>) -> Self {
        match result {
            Ok(value) => ActionResponse::ok(value),
            Err(e) => ActionResponse::failure(e.to_string()),
        }
    }
}
