//! Error types for the Permit SDK

use thiserror::Error;

/// Errors that can occur when calling the Permit API
#[derive(Debug, Error)]
pub enum PermitError {
    /// The client is missing something it needs to build a request,
    /// most commonly an environment id.
    #[error("{0}")]
    Configuration(String),

    /// The API answered with a non-success status
    #[error("Permit API error: {status} {status_text} - {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status code
        status_text: String,
        /// Raw response body, verbatim
        body: String,
    },

    /// No response was obtained (DNS, connect, timeout, reset)
    #[error("Network error: {0}")]
    Transport(String),

    /// A success response whose body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PermitError {
    /// The error raised when neither an explicit nor a default environment id exists
    pub fn missing_environment() -> Self {
        PermitError::Configuration(
            "Environment ID is required. Provide it as a parameter or set PERMIT_ENV_ID."
                .to_string(),
        )
    }

    /// Build an [`PermitError::Api`] from a status code and body
    pub fn api(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        PermitError::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.into(),
        }
    }

    /// HTTP status code, if this error came from an upstream response
    pub fn status(&self) -> Option<u16> {
        match self {
            PermitError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the upstream reported the entity as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Classify a reqwest error
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PermitError::Transport(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            PermitError::Transport(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            PermitError::InvalidResponse(format!("Failed to parse response: {}", err))
        } else {
            PermitError::Transport(format!("Request failed: {}", err))
        }
    }
}
