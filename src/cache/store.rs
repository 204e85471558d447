//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU eviction and TTL
//! expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

/// Fallback capacity when the configured bound is zero.
pub const DEFAULT_MAX_ITEMS: usize = 1000;

// == Cache Store ==
/// Bounded in-memory cache with per-entry TTL and LRU eviction.
///
/// Values are generic; callers store whatever response shape they need and
/// get a clone back on each hit. Every operation is total: reads answer with
/// `Option`, writes always succeed, and a write against a full cache evicts
/// the least recently used entry first.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of live entries
    max_items: usize,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_items` entries.
    ///
    /// A zero bound is an internal misconfiguration, corrected to
    /// [`DEFAULT_MAX_ITEMS`] rather than rejected.
    pub fn new(max_items: usize) -> Self {
        let max_items = if max_items == 0 {
            DEFAULT_MAX_ITEMS
        } else {
            max_items
        };
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_items,
        }
    }

    // == Set ==
    /// Stores a key-value pair expiring `ttl` from now.
    ///
    /// An existing entry for the same key is overwritten, resetting its
    /// expiration and access time. When the cache is already at capacity one
    /// entry is evicted before the insert, so the size bound holds at every
    /// observation point.
    pub fn set(&mut self, key: String, value: V, ttl: Duration) {
        if self.entries.len() >= self.max_items {
            self.evict_lru();
        }

        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// An expired entry is removed on the spot and counted as a miss; a live
    /// entry has its access time refreshed and is counted as a hit. Absent
    /// and expired keys are ordinary misses, not errors.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get_mut(key) {
            None => {
                self.stats.record_miss();
                None
            }
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                entry.touch();
                self.stats.record_hit();
                Some(entry.value.clone())
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key. No-op if the key is absent.
    pub fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed. Called by the background
    /// sweeper, independent of the lazy expiration performed on reads.
    pub fn purge_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        count
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.size = self.entries.len();
        stats.max_size = self.max_items;
        stats
    }

    // == Length ==
    /// Returns the current number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Evict LRU ==
    /// Removes the entry with the smallest last-access timestamp.
    ///
    /// Linear scan over all entries; ties keep the first candidate
    /// encountered. Does nothing when there is no candidate to evict.
    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            debug!(key = %key, "evicting least recently used entry");
            self.entries.remove(&key);
            self.stats.record_eviction();
        }
    }
}
