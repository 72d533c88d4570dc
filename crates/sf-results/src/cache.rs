//! In-memory memoization of pure run results.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::types::RunId;

/// Thread-safe map from run key to a shared result.
///
/// Values are computed outside the lock, so concurrent misses on the same key
/// may both compute; the first insertion wins and both callers observe it.
pub struct ResponseCache<V> {
    entries: Mutex<HashMap<RunId, Arc<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ResponseCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RunId, Arc<V>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.lock().get(key).cloned()
    }

    /// Return the cached value for `key`, or compute and store it.
    /// Failed computations are not cached.
    pub fn get_or_try_insert_with<E, F>(&self, key: &str, compute: F) -> Result<(Arc<V>, bool), E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok((hit, true));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let value = Arc::new(compute()?);
        let stored = self
            .lock()
            .entry(key.to_string())
            .or_insert(value)
            .clone();
        Ok((stored, false))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
