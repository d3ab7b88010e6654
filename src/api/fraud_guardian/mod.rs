pub mod client;
pub mod models;

pub use client::FraudGuardianClient;
pub use models::{ApiError, ClearHistoryResponse, ErrorResponse};
