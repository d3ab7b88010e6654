//! Data models for the Fraud Guardian client
//!
//! Wire types exchanged with the scoring backend and the values derived from
//! them for display.

pub mod transaction;
pub mod scoring;
pub mod summary;
pub mod fraud_check;
pub mod theme;

// Re-export commonly used types for convenience
pub use transaction::{TransactionRecord, TransactionStatus, TransactionType};
pub use scoring::{ScoringRequest, ScoringResult};
pub use summary::HistorySummary;
pub use fraud_check::FraudCheckOutcome;
pub use theme::ThemeMode;
