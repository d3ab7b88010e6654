use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use super::models::{ApiError, ClearHistoryResponse, ErrorResponse};
use crate::api::FraudBackend;
use crate::models::{ScoringRequest, ScoringResult};

/// Fraud Guardian backend client
pub struct FraudGuardianClient {
    http_client: HttpClient,
    base_url: String,
}

impl FraudGuardianClient {
    pub const PREDICT_PATH: &'static str = "/predict";
    pub const HISTORY_PATH: &'static str = "/history";
    pub const ALERTS_PATH: &'static str = "/alerts";
    pub const LATEST_PATH: &'static str = "/latest";
    pub const CLEAR_HISTORY_PATH: &'static str = "/clear-history";

    /// Create a client whose every request is bounded by `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .default_headers(Self::create_headers())
            .build()
            .map_err(|e| ApiError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success status and its body to an ApiError
    fn classify_error(status_code: u16, body_text: String) -> ApiError {
        // The backend reports failures as {"error": "..."}
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|e| e.error.or(e.message))
            .unwrap_or(body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            429 => ApiError::RateLimited(message),
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status_code = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();
        Self::classify_error(status_code, body_text)
    }

    /// Send a request and decode a successful JSON body
    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
    }

    /// POST /predict
    ///
    /// Scores one transaction. The backend also stores it, so it shows up in
    /// the next /history read.
    pub async fn predict(&self, request: &ScoringRequest) -> Result<ScoringResult, ApiError> {
        debug!(
            "POST {} type={} amount={}",
            Self::PREDICT_PATH, request.transaction_type, request.amount
        );
        self.execute(self.http_client.post(self.url(Self::PREDICT_PATH)).json(request))
            .await
    }

    /// GET /history
    ///
    /// Raw records, newest first by convention. Individual records are not
    /// validated here; a body that is not an array is a deserialization error.
    pub async fn get_history(&self) -> Result<Vec<Value>, ApiError> {
        debug!("GET {}", Self::HISTORY_PATH);
        self.execute(self.http_client.get(self.url(Self::HISTORY_PATH)))
            .await
    }

    /// GET /alerts
    pub async fn get_alerts(&self) -> Result<Vec<Value>, ApiError> {
        debug!("GET {}", Self::ALERTS_PATH);
        self.execute(self.http_client.get(self.url(Self::ALERTS_PATH)))
            .await
    }

    /// GET /latest
    ///
    /// The backend answers `{}` when nothing has been stored yet.
    pub async fn get_latest(&self) -> Result<Option<Value>, ApiError> {
        debug!("GET {}", Self::LATEST_PATH);
        let body: Value = self
            .execute(self.http_client.get(self.url(Self::LATEST_PATH)))
            .await?;

        match body {
            Value::Null => Ok(None),
            Value::Object(map) if map.is_empty() => Ok(None),
            Value::Object(map) => Ok(Some(Value::Object(map))),
            other => Err(ApiError::Deserialization(format!(
                "Expected an object from {}, got {}",
                Self::LATEST_PATH,
                other
            ))),
        }
    }

    /// DELETE /clear-history
    pub async fn clear_history(&self) -> Result<ClearHistoryResponse, ApiError> {
        debug!("DELETE {}", Self::CLEAR_HISTORY_PATH);
        self.execute(self.http_client.delete(self.url(Self::CLEAR_HISTORY_PATH)))
            .await
    }
}

#[async_trait]
impl FraudBackend for FraudGuardianClient {
    async fn fetch_history(&self) -> Result<Vec<Value>, ApiError> {
        self.get_history().await
    }

    async fn fetch_alerts(&self) -> Result<Vec<Value>, ApiError> {
        self.get_alerts().await
    }

    async fn fetch_latest(&self) -> Result<Option<Value>, ApiError> {
        self.get_latest().await
    }

    async fn predict(&self, request: &ScoringRequest) -> Result<ScoringResult, ApiError> {
        FraudGuardianClient::predict(self, request).await
    }

    async fn clear_history(&self) -> Result<String, ApiError> {
        Ok(FraudGuardianClient::clear_history(self).await?.message)
    }
}
