//! Remote scoring/storage service boundary

pub mod fraud_guardian;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{ScoringRequest, ScoringResult};
use fraud_guardian::ApiError;

/// Operations the client needs from the scoring backend.
///
/// History reads return raw JSON records; shape checks happen in the
/// history cleanser so one bad record never fails a whole batch.
#[async_trait]
pub trait FraudBackend: Send + Sync {
    /// GET /history
    async fn fetch_history(&self) -> Result<Vec<Value>, ApiError>;

    /// GET /alerts
    async fn fetch_alerts(&self) -> Result<Vec<Value>, ApiError>;

    /// GET /latest, `None` when nothing is stored
    async fn fetch_latest(&self) -> Result<Option<Value>, ApiError>;

    /// POST /predict
    async fn predict(&self, request: &ScoringRequest) -> Result<ScoringResult, ApiError>;

    /// DELETE /clear-history, returns the backend's confirmation message
    async fn clear_history(&self) -> Result<String, ApiError>;
}
