//! Light/dark preference with lazy persistence.
//!
//! The mode starts from the system hint and is usable straight away. The
//! persisted choice is read in the background and applied at most once; an
//! explicit toggle before that read finishes wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::models::ThemeMode;
use crate::utils::errors::StoreError;
use crate::utils::kv_store::KeyValueStore;

/// Storage key for the persisted mode
pub const THEME_KEY: &str = "app_theme";

pub struct ThemeStore {
    mode: RwLock<ThemeMode>,
    loaded: AtomicBool,
    store: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    pub fn new(system_default: ThemeMode, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            mode: RwLock::new(system_default),
            loaded: AtomicBool::new(false),
            store,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.read().unwrap_or_else(|p| p.into_inner())
    }

    fn set_mode(&self, mode: ThemeMode) {
        *self.mode.write().unwrap_or_else(|p| p.into_inner()) = mode;
    }

    /// Apply the persisted mode, once. Failures keep the current mode.
    pub async fn load_persisted(&self) {
        if self.loaded.load(Ordering::SeqCst) {
            return;
        }

        let stored = match self.store.get(THEME_KEY).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Could not read theme preference: {}", e);
                None
            }
        };

        // A toggle may have landed while the read was pending
        if self.loaded.swap(true, Ordering::SeqCst) {
            debug!("Theme already set, ignoring persisted value");
            return;
        }

        match stored.as_deref().map(|raw| (raw, ThemeMode::parse(raw))) {
            Some((_, Some(mode))) => {
                debug!("Loaded persisted theme: {}", mode);
                self.set_mode(mode);
            }
            Some((raw, None)) => warn!("Ignoring invalid persisted theme '{}'", raw),
            None => debug!("No persisted theme, keeping {}", self.mode()),
        }
    }

    /// Flip the mode and persist it. The in-memory mode changes even if
    /// persisting fails.
    pub async fn toggle(&self) -> Result<ThemeMode, StoreError> {
        self.loaded.store(true, Ordering::SeqCst);

        let next = {
            let mut mode = self.mode.write().unwrap_or_else(|p| p.into_inner());
            *mode = mode.toggled();
            *mode
        };

        info!("Theme switched to {}", next);
        self.store.set(THEME_KEY, next.as_str()).await?;
        Ok(next)
    }
}
