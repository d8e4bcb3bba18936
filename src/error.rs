//! Error types for gateway, services and list controllers

use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the API gateway and resource services.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received.
    #[error("Network failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401 that is shown inline (login call, or already on the login view).
    #[error("{0}")]
    Unauthorized(String),

    /// 401 on a regular call: credentials were cleared and the navigator
    /// was sent back to the login view.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// 4xx with a structured payload from the backend.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// 5xx from the backend.
    #[error("Server error ({status}): {message}")]
    Server { status: StatusCode, message: String },

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Credentials were accepted but could not be stored locally.
    #[error("Failed to persist session: {0}")]
    Storage(String),
}

impl ApiError {
    /// Builds the error for a non-2xx status, preferring the backend's
    /// `{"error": "..."}` message.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = backend_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized(message)
        } else if status.is_server_error() {
            ApiError::Server { status, message }
        } else {
            ApiError::Api { status, message }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Transport(e) => e.status(),
            ApiError::Unauthorized(_) | ApiError::SessionExpired => {
                Some(StatusCode::UNAUTHORIZED)
            }
            ApiError::Api { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Decode(_) | ApiError::Storage(_) => None,
        }
    }
}

fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Failures of list-view transitions.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// A required form field was left blank.
    #[error("{0}")]
    Validation(String),

    /// Mutating action attempted without the admin role.
    #[error("You do not have permission to change records")]
    ReadOnly,

    #[error(transparent)]
    Api(#[from] ApiError),
}
