//! Client error taxonomy shared by the pipeline, auth actions and pages.
//!
//! ERROR HANDLING
//! ==============
//! Every remote failure funnels into `ApiError` so pages implement one
//! rendering path. Storage problems never show up here; the token store
//! absorbs them.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::time::Duration;

/// Failure of a single remote call, after the pipeline normalized it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("unexpected http status {status}")]
    Status { status: u16 },
    #[error("request rejected ({code}): {message}")]
    Rejected { code: i64, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("request superseded by logout")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Login was refused or could not reach the identity service.
    #[error("login failed: {0}")]
    Auth(#[source] TransportError),
    /// The operation needs a session token and none is present.
    #[error("not signed in")]
    NotAuthenticated,
    /// Role insufficient, caught before sending or reported by a 403.
    #[error("permission denied: {0}")]
    Permission(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// Short message suitable for an inline notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(TransportError::Rejected { message, .. }) if !message.is_empty() => message.clone(),
            Self::Auth(_) => "Sign-in failed. Check your username and password.".to_owned(),
            Self::NotAuthenticated => "Please sign in first.".to_owned(),
            Self::Permission(message) => message.clone(),
            Self::Transport(TransportError::Timeout(_)) => "The server took too long to respond.".to_owned(),
            Self::Transport(TransportError::Rejected { message, .. }) if !message.is_empty() => message.clone(),
            Self::Transport(_) => "Request failed. Please try again.".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
