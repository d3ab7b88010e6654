//! Request-coalescing cache for remote reads.
//!
//! Entries are keyed by endpoint. While a fetch for a key is in flight every
//! other caller for that key joins it instead of issuing its own request.
//! Successful results are kept for `ttl`; failures are never cached.
//!
//! Every fetch gets an id. Invalidation drops in-flight slots as well, and a
//! fetch only stores its result if its slot is still the current one, so a
//! response that predates an invalidation is handed to the callers already
//! waiting on it but never cached.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::fraud_guardian::ApiError;
use crate::utils::cancel::CancelToken;
use crate::utils::errors::SyncError;

type Outcome<T> = Option<Result<T, ApiError>>;
type Slots<T> = Arc<Mutex<HashMap<String, Slot<T>>>>;

enum Slot<T> {
    Ready { value: T, fetched_at: Instant },
    InFlight { id: u64, rx: watch::Receiver<Outcome<T>> },
}

enum Lookup<T> {
    Hit(T),
    Join(watch::Receiver<Outcome<T>>),
    Miss,
}

pub struct FetchCache<T> {
    ttl: Duration,
    next_id: AtomicU64,
    slots: Slots<T>,
}

fn lock<T>(slots: &Mutex<HashMap<String, Slot<T>>>) -> MutexGuard<'_, HashMap<String, Slot<T>>> {
    // Slots hold plain data, so a poisoned lock is still consistent
    slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn is_current<T>(slot: Option<&Slot<T>>, fetch_id: u64) -> bool {
    matches!(slot, Some(Slot::InFlight { id, .. }) if *id == fetch_id)
}

/// Owns the in-flight slot of one fetch. Dropping it without `finish`
/// (the fetch task panicked) frees the slot before waiters see the sender go.
struct InFlightGuard<T> {
    slots: Slots<T>,
    key: String,
    id: u64,
    tx: watch::Sender<Outcome<T>>,
}

impl<T: Clone> InFlightGuard<T> {
    fn finish(&self, result: Result<T, ApiError>) {
        self.settle(&result);
        self.tx.send_replace(Some(result));
    }

    fn settle(&self, result: &Result<T, ApiError>) {
        let mut slots = lock(&self.slots);
        if !is_current(slots.get(&self.key), self.id) {
            debug!(key = %self.key, "fetch superseded by invalidation, not caching result");
            return;
        }

        match result {
            Ok(value) => {
                slots.insert(
                    self.key.clone(),
                    Slot::Ready {
                        value: value.clone(),
                        fetched_at: Instant::now(),
                    },
                );
            }
            Err(e) => {
                warn!(key = %self.key, "fetch failed: {}", e);
                slots.remove(&self.key);
            }
        }
    }
}

impl<T> Drop for InFlightGuard<T> {
    fn drop(&mut self) {
        let mut slots = lock(&self.slots);
        if is_current(slots.get(&self.key), self.id) {
            warn!(key = %self.key, "fetch aborted, releasing slot");
            slots.remove(&self.key);
        }
    }
}

impl<T> FetchCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: AtomicU64::new(0),
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the cached value for `key`, join an in-flight fetch, or start one.
    ///
    /// The fetch itself runs detached, so a cancelled caller does not abort it
    /// for the other waiters; the cancelled caller just gets `Cancelled`.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        token: &CancelToken,
        fetch: F,
    ) -> Result<T, SyncError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        if token.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        let rx = {
            let mut slots = lock(&self.slots);
            let lookup = match slots.get(key) {
                Some(Slot::Ready { value, fetched_at }) if fetched_at.elapsed() < self.ttl => {
                    Lookup::Hit(value.clone())
                }
                Some(Slot::InFlight { rx, .. }) => Lookup::Join(rx.clone()),
                _ => Lookup::Miss,
            };

            match lookup {
                Lookup::Hit(value) => {
                    debug!(key, "fetch cache hit");
                    return Ok(value);
                }
                Lookup::Join(rx) => {
                    debug!(key, "joining in-flight fetch");
                    rx
                }
                Lookup::Miss => {
                    debug!(key, "fetch cache miss, starting request");
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let (tx, rx) = watch::channel(None);
                    slots.insert(key.to_string(), Slot::InFlight { id, rx: rx.clone() });
                    let guard = InFlightGuard {
                        slots: Arc::clone(&self.slots),
                        key: key.to_string(),
                        id,
                        tx,
                    };
                    Self::spawn_fetch(guard, fetch());
                    rx
                }
            }
        };

        Self::wait(rx, key, token).await
    }

    fn spawn_fetch<Fut>(guard: InFlightGuard<T>, fut: Fut)
    where
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        tokio::spawn(async move {
            let result = fut.await;
            guard.finish(result);
        });
    }

    async fn wait(
        mut rx: watch::Receiver<Outcome<T>>,
        key: &str,
        token: &CancelToken,
    ) -> Result<T, SyncError> {
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(result) = current {
                if token.is_cancelled() {
                    debug!(key, "consumer cancelled, discarding fetch result");
                    return Err(SyncError::Cancelled);
                }
                return result.map_err(SyncError::from);
            }

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(key, "consumer cancelled while fetch in flight");
                    return Err(SyncError::Cancelled);
                }
                changed = rx.changed() => {
                    if changed.is_err() {
                        return Err(SyncError::Unreachable("fetch aborted".to_string()));
                    }
                }
            }
        }
    }

    /// Forget `key`. A fetch already in flight still answers its current
    /// waiters, but its result is not cached and new callers fetch again.
    pub fn invalidate(&self, key: &str) {
        lock(&self.slots).remove(key);
    }

    /// Forget every key, in-flight fetches included
    pub fn clear(&self) {
        lock(&self.slots).clear();
    }
}
