//! User-facing notifications raised by the views.

use crate::client::{ApiError, ApiErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    /// The user must sign in first.
    LoginRequired,
    /// The press failed and was rolled back.
    Error { retryable: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn login_required(title: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::LoginRequired,
            title: title.into(),
            description: None,
        }
    }

    /// Notice for a failed call. A 401 becomes a sign-in prompt.
    pub fn from_error(title: impl Into<String>, err: &ApiError) -> Self {
        let kind = match err.kind {
            ApiErrorKind::Unauthenticated => NoticeKind::LoginRequired,
            _ => NoticeKind::Error {
                retryable: err.is_retryable(),
            },
        };
        Self {
            kind,
            title: title.into(),
            description: Some(err.message.clone()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error { .. })
    }
}
