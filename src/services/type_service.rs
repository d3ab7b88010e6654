//! Free-text payment type normalisation.
//!
//! Users type things like "upi", "Bank Transfer" or "cashout". The backend
//! only understands the five canonical types, so input is matched against a
//! keyword table (first match wins) and anything unrecognised is sent as
//! PAYMENT rather than rejected.

use tracing::debug;
use crate::models::TransactionType;

/// Keyword table, checked in order against the trimmed, upper-cased input
const TYPE_KEYWORDS: [(&str, TransactionType); 5] = [
    ("UPI", TransactionType::Payment),
    ("TRANSFER", TransactionType::Transfer),
    ("DEBIT", TransactionType::Debit),
    ("CASHIN", TransactionType::CashIn),
    ("CASHOUT", TransactionType::CashOut),
];

/// Type used when no keyword matches
pub const FALLBACK_TYPE: TransactionType = TransactionType::Payment;

/// How an input string was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeResolution {
    Matched {
        keyword: &'static str,
        transaction_type: TransactionType,
    },
    /// Nothing matched; the input is sent as `FALLBACK_TYPE`
    Defaulted,
}

impl TypeResolution {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TypeResolution::Matched { transaction_type, .. } => *transaction_type,
            TypeResolution::Defaulted => FALLBACK_TYPE,
        }
    }
}

pub fn classify_type(input: &str) -> TypeResolution {
    let key = input.trim().to_uppercase();
    TYPE_KEYWORDS
        .iter()
        .find(|(keyword, _)| key.contains(keyword))
        .map(|&(keyword, transaction_type)| TypeResolution::Matched {
            keyword,
            transaction_type,
        })
        .unwrap_or(TypeResolution::Defaulted)
}

/// Map free-text input onto a canonical type. Never fails.
pub fn normalize_type(input: &str) -> TransactionType {
    let resolution = classify_type(input);
    if resolution == TypeResolution::Defaulted {
        debug!("Unrecognised payment type '{}', sending as {}", input, FALLBACK_TYPE);
    }
    resolution.transaction_type()
}
