//! Aggregate history models

use super::TransactionRecord;

/// Running totals and trend derived from one history fetch.
///
/// Recomputed from scratch on every fetch and never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistorySummary {
    pub transaction_count: usize,
    pub total_spent: f64,
    pub suspicious_total: f64,
    /// `total_spent - suspicious_total`; includes amounts of unclassified records
    pub normal_total: f64,
    pub suspicious_items: Vec<TransactionRecord>,
    pub normal_items: Vec<TransactionRecord>,
    /// Records whose status is neither Normal nor Suspicious
    pub unclassified_items: Vec<TransactionRecord>,
    /// Recent amounts, oldest first, at most one window long, all finite
    pub trend: Vec<f64>,
}
