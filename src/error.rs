//! Client error types.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Payload could not be serialized to JSON.
    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body could not be parsed as JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Invalid request URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Request could not be constructed.
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// Response arrived with a status other than 200 OK.
    #[error("status code: {status}")]
    Status {
        /// The observed HTTP status code.
        status: u16,
    },

    /// The caller-supplied cancellation token fired during a request.
    #[error("request cancelled")]
    Cancelled,

    /// Underlying HTTP transport error.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket handshake or protocol error.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

impl ClientError {
    /// Check if this error consumes a retry attempt.
    ///
    /// Encoding and request-construction failures are fatal and surface
    /// immediately; transport failures, non-OK statuses, and cancellation
    /// are subject to the retry policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Cancelled | Self::Http(_))
    }

    /// Get the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
