//! Scripted in-memory backend for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use serde_json::Value;

use super::fraud_guardian::ApiError;
use super::FraudBackend;
use crate::models::{ScoringRequest, ScoringResult};

pub struct MockBackend {
    history: Result<Vec<Value>, ApiError>,
    alerts: Vec<Value>,
    history_delay: Duration,
    predict_delay: Duration,
    predict_errors: Mutex<VecDeque<ApiError>>,
    requests: Mutex<Vec<ScoringRequest>>,
    history_calls: AtomicUsize,
    alerts_calls: AtomicUsize,
}

impl MockBackend {
    pub fn with_history(history: Vec<Value>) -> Self {
        Self {
            history: Ok(history),
            alerts: Vec::new(),
            history_delay: Duration::ZERO,
            predict_delay: Duration::ZERO,
            predict_errors: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            history_calls: AtomicUsize::new(0),
            alerts_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_history(error: ApiError) -> Self {
        Self {
            history: Err(error),
            ..Self::with_history(Vec::new())
        }
    }

    pub fn alerts(mut self, alerts: Vec<Value>) -> Self {
        self.alerts = alerts;
        self
    }

    pub fn history_delay(mut self, delay: Duration) -> Self {
        self.history_delay = delay;
        self
    }

    pub fn predict_delay(mut self, delay: Duration) -> Self {
        self.predict_delay = delay;
        self
    }

    /// Errors returned by the next predict calls, in order, before succeeding
    pub fn predict_errors(self, errors: Vec<ApiError>) -> Self {
        *self.predict_errors.lock().unwrap() = errors.into();
        self
    }

    pub fn requests(&self) -> Vec<ScoringRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn alerts_calls(&self) -> usize {
        self.alerts_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FraudBackend for MockBackend {
    async fn fetch_history(&self) -> Result<Vec<Value>, ApiError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.history_delay).await;
        self.history.clone()
    }

    async fn fetch_alerts(&self) -> Result<Vec<Value>, ApiError> {
        self.alerts_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.alerts.clone())
    }

    async fn fetch_latest(&self) -> Result<Option<Value>, ApiError> {
        Ok(self.history.clone()?.into_iter().next())
    }

    async fn predict(&self, request: &ScoringRequest) -> Result<ScoringResult, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        tokio::time::sleep(self.predict_delay).await;

        if let Some(error) = self.predict_errors.lock().unwrap().pop_front() {
            return Err(error);
        }

        let suspicious = request.amount >= 10_000.0;
        Ok(ScoringResult {
            status: if suspicious { "Suspicious" } else { "Normal" }.to_string(),
            anomaly: u8::from(suspicious),
            anomaly_score: Some(if suspicious { 0.91 } else { 0.12 }),
            id: Some(1),
            time: Some(1_700_000_000_000),
        })
    }

    async fn clear_history(&self) -> Result<String, ApiError> {
        Ok("History cleared".to_string())
    }
}
