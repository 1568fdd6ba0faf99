use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Upper bound on live entries, matching Django's local-memory cache.
pub const DEFAULT_MAX_ENTRIES: usize = 300;

/// Time-bounded cache of rendered listing pages.
///
/// Entries are never invalidated by writes; they only expire after `ttl`.
/// Once `max_entries` live entries exist, the one closest to expiry is
/// evicted to make room.
#[derive(Clone)]
pub struct PageCache<K, V> {
    store: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
    max_entries: usize,
}

impl<K, V> PageCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_entries(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let store = self.store.read().await;
        store
            .get(key)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V)
    where
        K: Clone,
    {
        if self.ttl.is_zero() {
            return;
        }
        let now = Instant::now();
        let mut store = self.store.write().await;
        store.retain(|_, entry| !entry.is_expired(now));
        if store.len() >= self.max_entries && !store.contains_key(&key) {
            let oldest = store
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                store.remove(&oldest);
            }
        }
        store.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Number of stored entries, expired ones included until the next insert.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}
