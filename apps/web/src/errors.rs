use std::time::Duration;

use thiserror::Error;

use crate::backend::BackendError;

/// Generic message for faults nothing else handled.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Controller-level error type.
/// Every variant maps to a user-facing sentence via [`ClientError::user_message`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Caught before any network call.
    #[error("{0}")]
    Precondition(&'static str),

    /// A request of the same kind is still outstanding.
    #[error("{0}")]
    Busy(&'static str),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Non-2xx from the backend; `detail` already has the caller's fallback applied.
    #[error("Backend error (status {status}): {detail}")]
    Backend { status: u16, detail: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classifies a backend failure. `fallback` replaces a missing error detail.
    pub fn from_backend(err: BackendError, fallback: &str) -> Self {
        match err {
            BackendError::Http(e) if e.is_decode() => ClientError::Decode(e.to_string()),
            BackendError::Http(e) => ClientError::Transport(e.to_string()),
            BackendError::Api { status, detail } => ClientError::Backend {
                status,
                detail: detail.unwrap_or_else(|| fallback.to_string()),
            },
            BackendError::Parse(e) => ClientError::Decode(e.to_string()),
        }
    }

    /// Sentence shown to the user. Transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Precondition(msg) | ClientError::Busy(msg) => msg.to_string(),
            ClientError::Transport(_) => {
                "Cannot reach the server. Please check your connection.".to_string()
            }
            ClientError::Timeout(after) => format!(
                "The server did not respond within {} seconds.",
                after.as_secs()
            ),
            ClientError::Backend { detail, .. } => detail.clone(),
            ClientError::Decode(_) => "Unexpected response from server.".to_string(),
        }
    }
}
