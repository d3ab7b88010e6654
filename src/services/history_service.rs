//! History cleansing and trend extraction.
//!
//! The backend's history table is unversioned, so records are checked one by
//! one: anything without an object shape or a usable `id` is dropped and the
//! rest of the batch is kept.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::fraud_guardian::ApiError;
use crate::models::{TransactionRecord, TransactionStatus, TransactionType};
use crate::services::type_service::normalize_type;

/// Number of most recent records plotted on the trend chart
pub const DEFAULT_TREND_WINDOW: usize = 10;

/// Accepts JSON numbers and numeric strings
fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Whole float inside the i64 range; `as` would saturate anything outside it
fn whole_i64(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (in_range && f.fract() == 0.0).then_some(f as i64)
}

fn coerce_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_type(value: Option<&Value>) -> TransactionType {
    match value.and_then(Value::as_str) {
        Some(raw) => TransactionType::from_wire(raw).unwrap_or_else(|| normalize_type(raw)),
        None => normalize_type(""),
    }
}

fn parse_record(index: usize, obj: &Map<String, Value>) -> Option<TransactionRecord> {
    let Some(id) = coerce_i64(obj.get("id")) else {
        warn!("Dropping history entry {}: missing or non-integer id", index);
        return None;
    };

    let status = obj
        .get("status")
        .and_then(Value::as_str)
        .map(TransactionStatus::from)
        .unwrap_or_else(|| TransactionStatus::Other("Unknown".to_string()));

    // Kept as NaN so the record still lists, but never reaches a chart or a total
    let amount = coerce_f64(obj.get("amount")).unwrap_or(f64::NAN);
    if !amount.is_finite() {
        debug!("History record {} has no usable amount", id);
    }

    let balance = |field: &str| coerce_f64(obj.get(field)).filter(|v| v.is_finite()).unwrap_or(0.0);

    Some(TransactionRecord {
        id,
        status,
        amount,
        score: coerce_f64(obj.get("score")).filter(|v| v.is_finite()),
        time: coerce_i64(obj.get("time")).unwrap_or(0),
        step: coerce_i64(obj.get("step")),
        transaction_type: parse_type(obj.get("type")),
        old_balance_org: balance("oldbalanceOrg"),
        new_balance_orig: balance("newbalanceOrig"),
        old_balance_dest: balance("oldbalanceDest"),
        new_balance_dest: balance("newbalanceDest"),
    })
}

/// Validate a batch of raw records, newest first.
///
/// Bad entries are dropped individually. The survivors are sorted by `time`
/// descending (stable, so equal times keep server order) since the backend's
/// ordering is a convention rather than a guarantee.
pub fn cleanse(raw: &[Value]) -> Vec<TransactionRecord> {
    let mut records: Vec<TransactionRecord> = raw
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Value::Object(obj) => parse_record(index, obj),
            other => {
                warn!("Dropping history entry {}: expected an object, got {}", index, other);
                None
            }
        })
        .collect();

    let dropped = raw.len() - records.len();
    if dropped > 0 {
        debug!("Cleansed history: kept {}, dropped {}", records.len(), dropped);
    }

    records.sort_by(|a, b| b.time.cmp(&a.time));
    records
}

/// Cleanse a whole response body; anything but an array is malformed
pub fn cleanse_response(body: &Value) -> Result<Vec<TransactionRecord>, ApiError> {
    match body {
        Value::Array(items) => Ok(cleanse(items)),
        other => Err(ApiError::Deserialization(format!(
            "Expected a list of transactions, got {}",
            other
        ))),
    }
}

/// Chart series from newest-first records.
///
/// Takes the newest `window` records, drops non-finite amounts and returns
/// the rest oldest first. Never returns an empty series: if nothing usable
/// remains the result is `[0.0]`.
pub fn derive_trend(newest_first: &[TransactionRecord], window: usize) -> Vec<f64> {
    let mut amounts: Vec<f64> = newest_first
        .iter()
        .take(window)
        .map(|r| r.amount)
        .filter(|a| a.is_finite())
        .collect();

    if amounts.is_empty() {
        return vec![0.0];
    }

    amounts.reverse();
    amounts
}
