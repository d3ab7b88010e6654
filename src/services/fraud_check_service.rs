//! Fraud check workflow - re-score the latest transaction on file
//!
//! The check replays the newest history record exactly as stored (balances
//! included, even if they do not add up) with a fresh `step`. With no history
//! it scores a fixed default transaction so the action is never blocked.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::api::fraud_guardian::ApiError;
use crate::api::FraudBackend;
use crate::models::{FraudCheckOutcome, ScoringRequest, ScoringResult, TransactionRecord, TransactionType};
use crate::services::history_service::cleanse;
use crate::services::request_service::TransferForm;
use crate::utils::cancel::CancelToken;
use crate::utils::clock::Clock;
use crate::utils::errors::{OrchestratorError, SubmitError};
use crate::utils::retry::RetryPolicy;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounds applied to every remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemotePolicy {
    pub timeout: Duration,
    /// Applied to scoring calls only
    pub retry: RetryPolicy,
}

impl Default for RemotePolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::none(),
        }
    }
}

enum CallError {
    Cancelled,
    Api(ApiError),
}

impl From<CallError> for OrchestratorError {
    fn from(e: CallError) -> Self {
        match e {
            CallError::Cancelled => OrchestratorError::Cancelled,
            CallError::Api(api) => OrchestratorError::from(api),
        }
    }
}

/// Request scored when there is no history to replay
pub fn default_request(step: i64) -> ScoringRequest {
    ScoringRequest {
        step,
        transaction_type: TransactionType::Payment,
        amount: 1000.0,
        old_balance_org: 5000.0,
        new_balance_orig: 4000.0,
        old_balance_dest: 0.0,
        new_balance_dest: 1000.0,
    }
}

/// Request replaying a stored record as-is
pub fn replay_request(record: &TransactionRecord, step: i64) -> ScoringRequest {
    ScoringRequest {
        step,
        transaction_type: record.transaction_type,
        amount: record.amount,
        old_balance_org: record.old_balance_org,
        new_balance_orig: record.new_balance_orig,
        old_balance_dest: record.old_balance_dest,
        new_balance_dest: record.new_balance_dest,
    }
}

pub struct FraudCheckService {
    backend: Arc<dyn FraudBackend>,
    clock: Arc<dyn Clock>,
    policy: RemotePolicy,
}

impl FraudCheckService {
    pub fn new(backend: Arc<dyn FraudBackend>, clock: Arc<dyn Clock>, policy: RemotePolicy) -> Self {
        Self {
            backend,
            clock,
            policy,
        }
    }

    /// Run a remote call under the timeout, racing the cancel token
    async fn bounded<T, Fut>(&self, token: &CancelToken, fut: Fut) -> Result<T, CallError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(CallError::Cancelled),
            outcome = tokio::time::timeout(self.policy.timeout, fut) => match outcome {
                Ok(result) => result.map_err(CallError::Api),
                Err(_) => {
                    warn!("Backend call timed out after {:?}", self.policy.timeout);
                    Err(CallError::Api(ApiError::Timeout))
                }
            },
        }
    }

    async fn score(&self, request: &ScoringRequest, token: &CancelToken) -> Result<ScoringResult, OrchestratorError> {
        let mut attempt = 1;
        loop {
            match self.bounded(token, self.backend.predict(request)).await {
                Ok(result) => return Ok(result),
                Err(CallError::Api(e)) if e.is_retryable() && self.policy.retry.should_retry(attempt) => {
                    let delay = self.policy.retry.backoff_for(attempt);
                    warn!("Scoring attempt {} failed ({}), retrying in {:?}", attempt, e, delay);
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => return Err(OrchestratorError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
                Err(e) => {
                    let err = OrchestratorError::from(e);
                    warn!("Scoring failed after {} attempt(s): {}", attempt, err);
                    return Err(err);
                }
            }
        }
    }

    /// Re-score the latest transaction, or the default one when history is empty.
    ///
    /// History is not re-read afterwards; callers refresh their own view.
    pub async fn run_check(&self, token: &CancelToken) -> Result<FraudCheckOutcome, OrchestratorError> {
        let raw = self
            .bounded(token, self.backend.fetch_history())
            .await
            .map_err(|e| {
                let err = OrchestratorError::from(e);
                warn!("Could not load history for fraud check: {}", err);
                err
            })?;

        let history = cleanse(&raw);
        let step = self.clock.now_seconds();

        let request = match history.first() {
            Some(latest) => {
                info!("Re-scoring latest transaction {} ({} {})", latest.id, latest.transaction_type, latest.amount);
                replay_request(latest, step)
            }
            None => {
                info!("No history on file, scoring default transaction");
                default_request(step)
            }
        };

        let result = self.score(&request, token).await?;
        info!(
            "Fraud check result: {} (anomaly={}, score={:?})",
            result.status, result.anomaly, result.anomaly_score
        );

        Ok(FraudCheckOutcome {
            amount: request.amount,
            request,
            result,
        })
    }

    /// Build a request from the send-money form and score it
    pub async fn submit_transfer(
        &self,
        form: &TransferForm,
        token: &CancelToken,
    ) -> Result<FraudCheckOutcome, SubmitError> {
        let request = form.to_request(self.clock.as_ref())?;
        info!("Submitting {} of {}", request.transaction_type, request.amount);
        let result = self.score(&request, token).await?;
        Ok(FraudCheckOutcome {
            amount: request.amount,
            request,
            result,
        })
    }
}
