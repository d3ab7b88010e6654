use thiserror::Error;
use crate::api::fraud_guardian::ApiError;

/// Malformed or missing user input. No request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
}

/// Failures of the fraud-check workflow
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrchestratorError {
    #[error("Unable to reach backend: {0}")]
    Unreachable(String),
    #[error("Backend did not respond in time")]
    Timeout,
    #[error("Request cancelled")]
    Cancelled,
}

impl From<ApiError> for OrchestratorError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Timeout => OrchestratorError::Timeout,
            other => OrchestratorError::Unreachable(other.to_string()),
        }
    }
}

/// Failures while loading history for display
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("Unable to reach backend: {0}")]
    Unreachable(String),
    #[error("Backend did not respond in time")]
    Timeout,
    #[error("Request cancelled")]
    Cancelled,
}

impl From<ApiError> for SyncError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Timeout => SyncError::Timeout,
            other => SyncError::Unreachable(other.to_string()),
        }
    }
}

/// Failures of the send-money flow
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] OrchestratorError),
}

/// Key-value persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage format error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}
