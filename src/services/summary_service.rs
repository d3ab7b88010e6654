use crate::models::{HistorySummary, TransactionRecord, TransactionStatus};
use crate::services::history_service::{derive_trend, DEFAULT_TREND_WINDOW};

/// Amount as it counts towards a total; unusable amounts count as zero
fn contribution(record: &TransactionRecord) -> f64 {
    if record.amount.is_finite() {
        record.amount
    } else {
        0.0
    }
}

/// Totals, status partitions and trend for one history fetch
pub fn summarize(history: &[TransactionRecord]) -> HistorySummary {
    summarize_with_window(history, DEFAULT_TREND_WINDOW)
}

/// `summarize` with a custom trend window.
///
/// `normal_total` is everything that is not Suspicious, so it also covers
/// records with other labels (e.g. "Unknown"); `normal_items` only holds
/// records labelled Normal. Those other records are in `unclassified_items`.
pub fn summarize_with_window(history: &[TransactionRecord], window: usize) -> HistorySummary {
    let mut suspicious_items = Vec::new();
    let mut normal_items = Vec::new();
    let mut unclassified_items = Vec::new();

    for record in history {
        match record.status {
            TransactionStatus::Suspicious => suspicious_items.push(record.clone()),
            TransactionStatus::Normal => normal_items.push(record.clone()),
            TransactionStatus::Other(_) => unclassified_items.push(record.clone()),
        }
    }

    let total_spent: f64 = history.iter().map(contribution).sum();
    let suspicious_total: f64 = suspicious_items.iter().map(contribution).sum();

    HistorySummary {
        transaction_count: history.len(),
        total_spent,
        suspicious_total,
        normal_total: total_spent - suspicious_total,
        suspicious_items,
        normal_items,
        unclassified_items,
        trend: derive_trend(history, window),
    }
}
