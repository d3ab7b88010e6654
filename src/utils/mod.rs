pub mod cancel;
pub mod clock;
pub mod errors;
pub mod fetch_cache;
pub mod kv_store;
pub mod retry;
pub mod table;

pub use cancel::{CancelOnDrop, CancelToken};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{ConfigError, OrchestratorError, StoreError, SubmitError, SyncError, ValidationError};
pub use fetch_cache::FetchCache;
pub use kv_store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use retry::RetryPolicy;
pub use table::{Align, Table};
