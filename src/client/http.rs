use serde_json::Value;
use tracing::debug;

use super::{ApiError, Transport};
use crate::microsvc::{ActionResponse, CommandResponse, USER_ID_HEADER};

/// Posts commands to a running toggle server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    user_id: Option<String>,
}

impl HttpTransport {
    /// `base_url` without a trailing slash, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: None,
        }
    }

    /// Send requests as this signed-in user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

impl Transport for HttpTransport {
    async fn send(&self, command: &str, input: Value) -> Result<CommandResponse, ApiError> {
        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, command))
            .json(&input);
        if let Some(user_id) = &self.user_id {
            request = request.header(USER_ID_HEADER, user_id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body: ActionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        debug!(command, status, success = body.success, "toggle call finished");
        Ok(CommandResponse { status, body })
    }
}
