use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the backend on failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Response from DELETE /clear-history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub message: String,
}

/// Errors raised by the HTTP collaborator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 400 Bad Request (missing or non-numeric field on /predict)
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    Request(String),
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body did not have the expected shape
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// Whether repeating the same request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Request(_)
                | ApiError::Timeout
                | ApiError::ServerError(_, _)
                | ApiError::RateLimited(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Deserialization(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}
