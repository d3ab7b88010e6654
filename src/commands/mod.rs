pub mod summary;
pub mod history;
pub mod alerts;
pub mod check;
pub mod send;
pub mod chart;
pub mod theme;
pub mod clear;
pub mod help;

use std::sync::Arc;
use chrono::DateTime;
use tracing::{debug, error};

use crate::api::fraud_guardian::{ApiError, FraudGuardianClient};
use crate::api::FraudBackend;
use crate::config::AppConfig;
use crate::services::{FraudCheckService, HistorySync, RemotePolicy, ThemeStore};
use crate::utils::cancel::CancelToken;
use crate::utils::clock::SystemClock;
use crate::utils::errors::{OrchestratorError, SyncError};
use crate::utils::kv_store::{JsonFileStore, KeyValueStore};

/// Everything a command needs, shared for the lifetime of the process
pub struct AppContext {
    pub config: AppConfig,
    pub backend: Arc<dyn FraudBackend>,
    pub sync: HistorySync,
    pub fraud: FraudCheckService,
    pub theme: ThemeStore,
}

impl AppContext {
    pub fn new(config: AppConfig, backend: Arc<dyn FraudBackend>, prefs: Arc<dyn KeyValueStore>) -> Self {
        let policy = RemotePolicy {
            timeout: config.request_timeout,
            retry: config.retry,
        };
        Self {
            sync: HistorySync::new(Arc::clone(&backend), config.cache_ttl),
            fraud: FraudCheckService::new(Arc::clone(&backend), Arc::new(SystemClock), policy),
            theme: ThemeStore::new(config.system_theme, prefs),
            backend,
            config,
        }
    }

    /// Wire up the HTTP backend and file-backed preferences
    pub fn from_config(config: AppConfig) -> Result<Self, ApiError> {
        let client = FraudGuardianClient::new(&config.base_url, config.request_timeout)?;
        let prefs = JsonFileStore::new(config.theme_store_path.clone());
        Ok(Self::new(config, Arc::new(client), Arc::new(prefs)))
    }
}

/// Amount for display; unusable amounts show as a dash
pub(crate) fn format_amount(amount: f64) -> String {
    if amount.is_finite() {
        format!("{:.2}", amount)
    } else {
        "-".to_string()
    }
}

pub(crate) fn format_time(epoch_millis: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_millis) {
        Some(time) if epoch_millis > 0 => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => "-".to_string(),
    }
}

pub(crate) fn sync_failure(e: &SyncError) -> String {
    match e {
        SyncError::Unreachable(_) => "⚠️ Unable to reach backend".to_string(),
        SyncError::Timeout => "⚠️ Backend did not respond in time".to_string(),
        SyncError::Cancelled => "Cancelled".to_string(),
    }
}

pub(crate) fn check_failure(e: &OrchestratorError) -> String {
    match e {
        OrchestratorError::Unreachable(_) => "⚠️ Unable to reach backend".to_string(),
        OrchestratorError::Timeout => "⚠️ Backend did not respond in time".to_string(),
        OrchestratorError::Cancelled => "Cancelled".to_string(),
    }
}

/// Run one command line and return what to print, `None` for a blank line
pub async fn handle_line(ctx: &AppContext, line: &str, token: &CancelToken) -> Option<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }

    let command = parts[0];
    let args = &parts[1..];
    debug!("Running command '{}' with {} arg(s)", command, args.len());

    let result = match command.to_lowercase().as_str() {
        "summary" | "dashboard" => summary::execute(ctx, args, token).await,
        "history" | "hist" => history::execute(ctx, args, token).await,
        "alerts" => alerts::execute(ctx, args, token).await,
        "check" => check::execute(ctx, token).await,
        "send" | "transfer" => send::execute(ctx, args, token).await,
        "chart" => chart::execute(ctx, args, token).await,
        "theme" => theme::execute(ctx, args).await,
        "clear" => clear::execute(ctx).await,
        "help" | "?" => Ok(help::execute()),
        other => Err(format!("Unknown command '{}'. Type `help` for a list of commands.", other)),
    };

    Some(match result {
        Ok(output) => output,
        Err(e) => {
            error!("Command {} failed: {}", command, e);
            format!("❌ {}", e)
        }
    })
}
