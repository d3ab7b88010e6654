//! Fraud check models

use super::{ScoringRequest, ScoringResult};

/// A scored transaction: the fraud check replay or a submitted transfer
#[derive(Debug, Clone, PartialEq)]
pub struct FraudCheckOutcome {
    /// Amount of the transaction that was scored
    pub amount: f64,
    pub request: ScoringRequest,
    pub result: ScoringResult,
}

impl FraudCheckOutcome {
    pub fn is_suspicious(&self) -> bool {
        self.result.is_anomaly()
    }
}
