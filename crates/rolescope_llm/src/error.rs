//! Error types for the recommendation client.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for recommendation operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Recommendation request failures. None of these are retried.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Recommendation service returned HTTP {status}: {body}")]
    Service {
        status: u16,
        body: String,
        /// Request id header, when the service sent one.
        request_id: Option<String>,
    },

    #[error("Malformed recommendation response: {0}")]
    MalformedResponse(String),

    #[error("Recommendation request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Recommendation request failed: {0}")]
    Transport(String),

    #[error("Invalid recommendation endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },
}

impl LlmError {
    /// HTTP status for service errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
