//! Transaction models

use std::fmt;
use serde::{Deserialize, Serialize};

/// Canonical payment categories understood by the scoring backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    CashIn,
    CashOut,
    Payment,
    Transfer,
    Debit,
}

impl TransactionType {
    pub const ALL: [TransactionType; 5] = [
        TransactionType::CashIn,
        TransactionType::CashOut,
        TransactionType::Payment,
        TransactionType::Transfer,
        TransactionType::Debit,
    ];

    /// Wire name, e.g. `CASH_IN`
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CashIn => "CASH_IN",
            TransactionType::CashOut => "CASH_OUT",
            TransactionType::Payment => "PAYMENT",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Debit => "DEBIT",
        }
    }

    /// Exact (case-insensitive) match against the wire names
    pub fn from_wire(value: &str) -> Option<Self> {
        let upper = value.trim().to_uppercase();
        Self::ALL.into_iter().find(|t| t.as_str() == upper)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label the backend stored for a scored transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Normal,
    Suspicious,
    /// Any other label, e.g. "Unknown" when the backend had no model loaded
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Normal => "Normal",
            TransactionStatus::Suspicious => "Suspicious",
            TransactionStatus::Other(s) => s,
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(value: &str) -> Self {
        match value {
            "Normal" => TransactionStatus::Normal,
            "Suspicious" => TransactionStatus::Suspicious,
            other => TransactionStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        TransactionStatus::from(value.as_str())
    }
}

impl From<TransactionStatus> for String {
    fn from(value: TransactionStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored transaction as stored by the backend. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub status: TransactionStatus,
    pub amount: f64,
    pub score: Option<f64>,
    /// Epoch millis
    pub time: i64,
    pub step: Option<i64>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "oldbalanceOrg")]
    pub old_balance_org: f64,
    #[serde(rename = "newbalanceOrig")]
    pub new_balance_orig: f64,
    #[serde(rename = "oldbalanceDest")]
    pub old_balance_dest: f64,
    #[serde(rename = "newbalanceDest")]
    pub new_balance_dest: f64,
}

impl TransactionRecord {
    pub fn is_suspicious(&self) -> bool {
        self.status == TransactionStatus::Suspicious
    }
}
