//! Client for the Fraud Guardian anomaly-scoring backend.
//!
//! Builds scoring requests from user input, keeps a cleansed and cached view
//! of the stored transaction history, derives totals and trends from it, and
//! re-scores the latest transaction on demand.

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use api::fraud_guardian::{ApiError, FraudGuardianClient};
pub use api::FraudBackend;
pub use config::AppConfig;
