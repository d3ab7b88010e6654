pub mod type_service;
pub mod request_service;
pub mod history_service;
pub mod summary_service;
pub mod fraud_check_service;
pub mod sync_service;
pub mod theme_service;
pub mod chart_service;

pub use fraud_check_service::{FraudCheckService, RemotePolicy};
pub use request_service::{build_request, TransferForm};
pub use sync_service::HistorySync;
pub use theme_service::ThemeStore;
pub use type_service::normalize_type;
