//! Client side of the toggle API.
//!
//! [`ToggleClient`] turns typed calls into commands and decodes the
//! `{ success, data?, error? }` envelope. The wire is a [`Transport`]:
//! [`LocalTransport`] dispatches in-process (server-side rendering, tests),
//! and `HttpTransport` (feature `client`) posts to a running server.

mod local;
#[cfg(feature = "client")]
mod http;

use std::fmt;
use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{Tally, TargetKind, VoteDirection, VoteSnapshot};
use crate::handlers;
use crate::microsvc::CommandResponse;
use crate::toggle::{SaveStatus, VoteStatus};

pub use local::LocalTransport;
#[cfg(feature = "client")]
pub use http::HttpTransport;

/// Carries one command to the service and brings back its response.
pub trait Transport {
    fn send(
        &self,
        command: &str,
        input: Value,
    ) -> impl Future<Output = Result<CommandResponse, ApiError>> + Send;
}

/// Body of a `vote.create` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub target_id: String,
    pub target_type: TargetKind,
    pub vote_type: VoteDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthenticated,
    NotFound,
    Invalid,
    /// Server-side store failure.
    Store,
    /// The request never produced a readable response.
    Transport,
}

/// A failed toggle call as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    /// Classify a failed response by its status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let kind = match status {
            401 => ApiErrorKind::Unauthenticated,
            404 => ApiErrorKind::NotFound,
            400 | 422 => ApiErrorKind::Invalid,
            500..=599 => ApiErrorKind::Store,
            _ => ApiErrorKind::Transport,
        };
        Self::new(kind, message)
    }

    /// Whether pressing the button again might work.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Store | ApiErrorKind::Transport)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Typed calls over any [`Transport`].
#[derive(Debug, Clone)]
pub struct ToggleClient<T> {
    transport: T,
}

impl<T: Transport> ToggleClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn vote(&self, request: &VoteRequest) -> Result<VoteSnapshot, ApiError> {
        let input = serde_json::to_value(request).map_err(|e| ApiError::transport(e.to_string()))?;
        self.call(handlers::vote_create::COMMAND, input).await
    }

    pub async fn vote_status(
        &self,
        target_type: TargetKind,
        target_id: &str,
    ) -> Result<VoteStatus, ApiError> {
        self.call(
            handlers::vote_status::COMMAND,
            json!({ "targetId": target_id, "targetType": target_type }),
        )
        .await
    }

    pub async fn toggle_save(&self, question_id: &str) -> Result<SaveStatus, ApiError> {
        self.call(
            handlers::collection_toggle::COMMAND,
            json!({ "questionId": question_id }),
        )
        .await
    }

    pub async fn save_status(&self, question_id: &str) -> Result<SaveStatus, ApiError> {
        self.call(
            handlers::collection_status::COMMAND,
            json!({ "questionId": question_id }),
        )
        .await
    }

    pub async fn saved_questions(&self) -> Result<Vec<String>, ApiError> {
        #[derive(Deserialize)]
        struct Saved {
            questions: Vec<String>,
        }

        let saved: Saved = self.call(handlers::collection_list::COMMAND, json!({})).await?;
        Ok(saved.questions)
    }

    pub async fn target(&self, target_type: TargetKind, target_id: &str) -> Result<Tally, ApiError> {
        self.call(
            handlers::target_get::COMMAND,
            json!({ "targetId": target_id, "targetType": target_type }),
        )
        .await
    }

    async fn call<O: DeserializeOwned>(&self, command: &str, input: Value) -> Result<O, ApiError> {
        let response = self.transport.send(command, input).await?;

        if !response.body.success {
            return Err(ApiError::from_status(
                response.status,
                response.body.error_message(),
            ));
        }

        let data = response
            .body
            .data
            .ok_or_else(|| ApiError::transport("response carried no data"))?;
        serde_json::from_value(data).map_err(|e| ApiError::transport(e.to_string()))
    }
}
