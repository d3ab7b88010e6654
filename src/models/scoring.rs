//! Scoring request/response models
//!
//! Field names on the wire are a fixed contract with the backend, including
//! the mixed `Org`/`Orig` suffixes.

use serde::{Deserialize, Serialize};
use super::TransactionType;

/// Body of POST /predict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub step: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    #[serde(rename = "oldbalanceOrg")]
    pub old_balance_org: f64,
    #[serde(rename = "newbalanceOrig")]
    pub new_balance_orig: f64,
    #[serde(rename = "oldbalanceDest")]
    pub old_balance_dest: f64,
    #[serde(rename = "newbalanceDest")]
    pub new_balance_dest: f64,
}

/// Response of POST /predict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub status: String,
    pub anomaly: u8,
    /// `null` when the backend has no model loaded
    #[serde(default)]
    pub anomaly_score: Option<f64>,
    /// Row id the backend stored the scored transaction under
    #[serde(default)]
    pub id: Option<i64>,
    /// Epoch millis at which the backend stored the transaction
    #[serde(default)]
    pub time: Option<i64>,
}

impl ScoringResult {
    pub fn is_anomaly(&self) -> bool {
        self.anomaly == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_backend_field_names() {
        let request = ScoringRequest {
            step: 1_700_000_000,
            transaction_type: TransactionType::CashOut,
            amount: 250.0,
            old_balance_org: 1000.0,
            new_balance_orig: 750.0,
            old_balance_dest: 10.0,
            new_balance_dest: 260.0,
        };

        let json = serde_json::to_value(&request).expect("serialize");
        let obj = json.as_object().expect("object");

        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "amount",
                "newbalanceDest",
                "newbalanceOrig",
                "oldbalanceDest",
                "oldbalanceOrg",
                "step",
                "type",
            ]
        );
        assert_eq!(obj["type"], "CASH_OUT");
    }

    #[test]
    fn test_result_tolerates_missing_score() {
        let body = r#"{"status": "Unknown", "anomaly": 0, "anomaly_score": null, "id": 7, "time": 1700000000000}"#;
        let result: ScoringResult = serde_json::from_str(body).expect("deserialize");
        assert_eq!(result.anomaly_score, None);
        assert_eq!(result.id, Some(7));
        assert!(!result.is_anomaly());
    }
}
