//! Cached, coalesced reads of the backend's transaction history.
//!
//! Every screen that shows history goes through one `HistorySync`, so two
//! consumers opening at once share a single request per endpoint.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::fraud_guardian::ApiError;
use crate::api::FraudBackend;
use crate::models::{HistorySummary, TransactionRecord};
use crate::services::history_service::cleanse;
use crate::services::summary_service::summarize_with_window;
use crate::utils::cancel::CancelToken;
use crate::utils::errors::SyncError;
use crate::utils::fetch_cache::FetchCache;

const HISTORY_KEY: &str = "/history";
const ALERTS_KEY: &str = "/alerts";
const LATEST_KEY: &str = "/latest";

pub struct HistorySync {
    backend: Arc<dyn FraudBackend>,
    records: FetchCache<Arc<Vec<TransactionRecord>>>,
    latest: FetchCache<Option<TransactionRecord>>,
}

impl HistorySync {
    pub fn new(backend: Arc<dyn FraudBackend>, cache_ttl: Duration) -> Self {
        Self {
            backend,
            records: FetchCache::new(cache_ttl),
            latest: FetchCache::new(cache_ttl),
        }
    }

    /// Cleansed history, newest first
    pub async fn history(&self, token: &CancelToken) -> Result<Arc<Vec<TransactionRecord>>, SyncError> {
        let backend = Arc::clone(&self.backend);
        self.records
            .get_or_fetch(HISTORY_KEY, token, move || async move {
                let raw = backend.fetch_history().await?;
                Ok::<_, ApiError>(Arc::new(cleanse(&raw)))
            })
            .await
    }

    /// Drop the cached history and fetch it again
    pub async fn refresh(&self, token: &CancelToken) -> Result<Arc<Vec<TransactionRecord>>, SyncError> {
        info!("Refreshing transaction history");
        self.records.invalidate(HISTORY_KEY);
        self.history(token).await
    }

    pub async fn summary(&self, token: &CancelToken, window: usize) -> Result<HistorySummary, SyncError> {
        let history = self.history(token).await?;
        let summary = summarize_with_window(&history, window);
        debug!(
            "Summary: {} transactions, total {:.2}, suspicious {:.2}",
            summary.transaction_count, summary.total_spent, summary.suspicious_total
        );
        Ok(summary)
    }

    /// Suspicious records from the shared history fetch
    pub async fn alerts(&self, token: &CancelToken) -> Result<Vec<TransactionRecord>, SyncError> {
        let history = self.history(token).await?;
        Ok(history.iter().filter(|r| r.is_suspicious()).cloned().collect())
    }

    /// Suspicious records as filtered by the backend's /alerts endpoint
    pub async fn server_alerts(&self, token: &CancelToken) -> Result<Arc<Vec<TransactionRecord>>, SyncError> {
        let backend = Arc::clone(&self.backend);
        self.records
            .get_or_fetch(ALERTS_KEY, token, move || async move {
                let raw = backend.fetch_alerts().await?;
                Ok::<_, ApiError>(Arc::new(cleanse(&raw)))
            })
            .await
    }

    /// Most recent stored record, `None` when history is empty
    pub async fn latest(&self, token: &CancelToken) -> Result<Option<TransactionRecord>, SyncError> {
        let backend = Arc::clone(&self.backend);
        self.latest
            .get_or_fetch(LATEST_KEY, token, move || async move {
                let latest = backend.fetch_latest().await?;
                Ok::<_, ApiError>(latest.and_then(|value| cleanse(&[value]).into_iter().next()))
            })
            .await
    }

    /// Forget everything cached; call after anything that writes history
    pub fn invalidate(&self) {
        self.records.clear();
        self.latest.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::models::TransactionStatus;
    use serde_json::json;

    fn sample_history() -> Vec<serde_json::Value> {
        vec![
            json!({"id": 1, "status": "Normal", "amount": 50, "time": 100, "type": "PAYMENT"}),
            json!({"id": 2, "status": "Suspicious", "amount": 100, "time": 200, "type": "TRANSFER"}),
            json!({"broken": true}),
        ]
    }

    fn sync(backend: Arc<MockBackend>) -> HistorySync {
        HistorySync::new(backend, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_concurrent_consumers_share_one_request() {
        let backend = Arc::new(MockBackend::with_history(sample_history()).history_delay(Duration::from_millis(30)));
        let sync = sync(backend.clone());
        let (dashboard, analytics) = (CancelToken::new(), CancelToken::new());

        let (a, b) = tokio::join!(sync.history(&dashboard), sync.summary(&analytics, 10));

        assert_eq!(a.unwrap().len(), 2);
        assert_eq!(b.unwrap().total_spent, 150.0);
        assert_eq!(backend.history_calls(), 1);
    }

    #[tokio::test]
    async fn test_history_is_cleansed_newest_first() {
        let backend = Arc::new(MockBackend::with_history(sample_history()));
        let history = sync(backend).history(&CancelToken::new()).await.unwrap();

        let ids: Vec<i64> = history.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let backend = Arc::new(MockBackend::with_history(sample_history()));
        let sync = sync(backend.clone());
        let token = CancelToken::new();

        sync.history(&token).await.unwrap();
        sync.history(&token).await.unwrap();
        assert_eq!(backend.history_calls(), 1);

        sync.refresh(&token).await.unwrap();
        assert_eq!(backend.history_calls(), 2);

        sync.invalidate();
        sync.history(&token).await.unwrap();
        assert_eq!(backend.history_calls(), 3);
    }

    #[tokio::test]
    async fn test_alerts_filter_client_side() {
        let backend = Arc::new(MockBackend::with_history(sample_history()));
        let sync = sync(backend.clone());

        let alerts = sync.alerts(&CancelToken::new()).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].status, TransactionStatus::Suspicious);
        assert_eq!(backend.alerts_calls(), 0);
    }

    #[tokio::test]
    async fn test_server_alerts_use_alerts_endpoint() {
        let backend = Arc::new(
            MockBackend::with_history(vec![])
                .alerts(vec![json!({"id": 9, "status": "Suspicious", "amount": 75000, "time": 5})]),
        );
        let sync = sync(backend.clone());

        let alerts = sync.server_alerts(&CancelToken::new()).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, 9);
        assert_eq!(backend.alerts_calls(), 1);
        assert_eq!(backend.history_calls(), 0);
    }

    #[tokio::test]
    async fn test_latest() {
        let backend = Arc::new(MockBackend::with_history(sample_history()));
        let latest = sync(backend).latest(&CancelToken::new()).await.unwrap();
        assert_eq!(latest.map(|r| r.id), Some(1));

        let empty = Arc::new(MockBackend::with_history(vec![]));
        assert_eq!(sync(empty).latest(&CancelToken::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let backend = Arc::new(MockBackend::failing_history(ApiError::Request("connection refused".into())));
        let result = sync(backend).summary(&CancelToken::new(), 10).await;
        assert!(matches!(result, Err(SyncError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_dropped_consumer_gets_no_late_value() {
        let backend = Arc::new(MockBackend::with_history(sample_history()).history_delay(Duration::from_millis(100)));
        let sync = sync(backend.clone());
        let screen = CancelToken::new();
        let other = CancelToken::new();

        let closing = async {
            let guard = screen.drop_guard();
            let token = guard.token().clone();
            let fetch = sync.history(&token);
            tokio::pin!(fetch);
            tokio::select! {
                r = &mut fetch => panic!("fetch should not finish first: {:?}", r.map(|h| h.len())),
                _ = tokio::time::sleep(Duration::from_millis(10)) => {}
            }
            drop(guard);
            fetch.await
        };

        let (closed, survivor) = tokio::join!(closing, sync.history(&other));
        assert_eq!(closed, Err(SyncError::Cancelled));
        assert_eq!(survivor.unwrap().len(), 2);
        assert_eq!(backend.history_calls(), 1);
    }
}
