//! Small in-process cache with per-entry expiry.
//!
//! Backs the account summary endpoint, where recomputing aggregates on every
//! poll would hammer SQLite for identical answers. Entries are only dropped
//! lazily on access or through [`TtlCache::evict_expired`]; there is no
//! background reaper thread.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Thread-safe key-value cache where every entry carries its own deadline.
///
/// Cloning is cheap and clones share the same underlying map, so one instance
/// can be handed to every worker of the HTTP server.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: Arc<Mutex<HashMap<K, Entry<V>>>>,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the live value for `key`, dropping and skipping it if expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    /// A zero `ttl` effectively disables caching for that key.
    pub fn put(&self, key: K, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.lock().insert(key, entry);
    }

    /// Removes `key` regardless of its remaining lifetime.
    pub fn invalidate(&self, key: &K) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Removes every entry whose key matches `predicate`; returns how many
    /// were dropped. Used to flush all ranges of an account after a sync.
    pub fn invalidate_if(&self, predicate: impl Fn(&K) -> bool) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !predicate(key));
        before - entries.len()
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Number of stored entries, expired ones included until eviction.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, Entry<V>>> {
        // A poisoned lock only means a panic elsewhere; the map itself is
        // still usable for cache purposes.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn get_returns_value_before_expiry() {
        let cache = TtlCache::new();
        cache.put("a", 1u32, Duration::from_secs(60));
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_entries_are_dropped_on_access() {
        let cache = TtlCache::new();
        cache.put("a", 1u32, Duration::from_millis(5));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get(&"a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn put_replaces_value_and_deadline() {
        let cache = TtlCache::new();
        cache.put("a", 1u32, Duration::from_millis(5));
        cache.put("a", 2u32, Duration::from_secs(60));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get(&"a"), Some(2));
    }

    #[test]
    fn invalidate_removes_live_entries() {
        let cache = TtlCache::new();
        cache.put("a", 1u32, Duration::from_secs(60));
        assert!(cache.invalidate(&"a"));
        assert!(!cache.invalidate(&"a"));
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn invalidate_if_drops_matching_keys_only() {
        let cache = TtlCache::new();
        cache.put(("acc", 1), 10u32, Duration::from_secs(60));
        cache.put(("acc", 2), 20u32, Duration::from_secs(60));
        cache.put(("other", 1), 30u32, Duration::from_secs(60));

        let dropped = cache.invalidate_if(|(name, _)| *name == "acc");
        assert_eq!(dropped, 2);
        assert_eq!(cache.get(&(("other", 1))), Some(30));
    }

    #[test]
    fn evict_expired_sweeps_only_dead_entries() {
        let cache = TtlCache::new();
        cache.put("dead", 1u32, Duration::from_millis(5));
        cache.put("live", 2u32, Duration::from_secs(60));
        thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.evict_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"live"), Some(2));
    }

    #[test]
    fn clones_share_the_same_map() {
        let cache = TtlCache::new();
        let other = cache.clone();
        cache.put("a", 1u32, Duration::from_secs(60));
        assert_eq!(other.get(&"a"), Some(1));
    }
}
