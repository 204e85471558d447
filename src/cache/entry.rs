//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry: the stored value plus the timestamps that drive
/// expiration and eviction.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, owned exclusively by the entry
    pub value: V,
    /// Expiration timestamp (Unix nanoseconds)
    pub expires_at: u64,
    /// Last successful read (Unix nanoseconds); drives LRU eviction order
    pub last_access_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// A fresh entry counts as just-accessed, so it is not an immediate
    /// eviction candidate.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = now_nanos();
        Self {
            value,
            expires_at: now + ttl.as_nanos() as u64,
            last_access_at: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: the entry is valid at exactly `expires_at` and
    /// expired strictly after it.
    pub fn is_expired(&self) -> bool {
        now_nanos() > self.expires_at
    }

    // == Touch ==
    /// Refreshes the last-access timestamp. Called on every cache hit.
    pub fn touch(&mut self) {
        self.last_access_at = now_nanos();
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in nanoseconds.
pub fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_nanos() as u64
}
