//! Custom error types and handling
//!
//! This module defines the client's error types and the mapping from each
//! error to the inline message shown to the user. Every operation boundary
//! (submit, run tests, stats refresh) catches these and renders them in
//! place of results; none escape as an unhandled failure.

/// Client-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Local validation errors (never reach the network)
    #[error("Validation error: {0}")]
    Validation(String),

    // Network-level failures
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response format: {0}")]
    ResponseFormat(String),

    // Non-2xx with a server-supplied message
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    // Judge adapter errors
    #[error("Judge submit failed: {0}")]
    AdapterSubmit(String),

    #[error("Judge poll failed: {0}")]
    AdapterPoll(String),

    // Polling
    #[error("Operation timed out")]
    Timeout,

    #[error("Operation cancelled")]
    Cancelled,

    // Internal errors
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::ResponseFormat(_) => "RESPONSE_FORMAT_ERROR",
            Self::Backend { .. } => "BACKEND_ERROR",
            Self::AdapterSubmit(_) => "ADAPTER_SUBMIT_ERROR",
            Self::AdapterPoll(_) => "ADAPTER_POLL_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Cancelled => "CANCELLED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Inline message shown to the user for this error.
    ///
    /// Validation and backend messages pass through verbatim; everything
    /// else collapses to a generic message while the detail goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Backend { message, .. } => message.clone(),
            Self::Timeout => "The operation timed out. Please try again.".to_string(),
            Self::Transport(e) => {
                tracing::error!("Transport error: {}", e);
                "An unexpected error occurred. Please try again.".to_string()
            }
            Self::ResponseFormat(e) => {
                tracing::error!("Response format error: {}", e);
                "An unexpected error occurred. Please try again.".to_string()
            }
            Self::AdapterSubmit(e) | Self::AdapterPoll(e) => {
                tracing::error!("Judge error: {}", e);
                "The code execution service is unavailable. Please try again.".to_string()
            }
            Self::Cancelled => "The operation was cancelled.".to_string(),
            Self::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Whether this error originated locally, before any request was made
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::ResponseFormat(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::ResponseFormat(err.to_string())
    }
}

/// Result type alias using ClientError
pub type ClientResult<T> = Result<T, ClientError>;
