//! TTL cache for slowly changing facts
//!
//! A read returns the stored value while `now - last_update < ttl`; otherwise the
//! producer runs and its result replaces the entry. The lock is released while the
//! producer runs, so concurrent refreshes can race; the last one to finish wins.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    last_update: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_update) < self.ttl
    }
}

/// In-memory, process-lifetime cache keyed by `K`
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh cached value for `key`, or the producer's result
    ///
    /// Producer errors are returned as-is and leave the previous entry untouched.
    pub async fn get_or_refresh<F, Fut, E>(&self, key: K, ttl: Duration, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        {
            let entries = self.entries.lock().await;
            if let Some(entry) = entries.get(&key) {
                if entry.is_fresh(Instant::now()) {
                    return Ok(entry.value.clone());
                }
            }
        }

        let value = producer().await?;

        self.entries.lock().await.insert(
            key,
            CacheEntry {
                value: value.clone(),
                last_update: Instant::now(),
                ttl,
            },
        );

        Ok(value)
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
