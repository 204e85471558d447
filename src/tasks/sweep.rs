//! Background Sweep Tasks
//!
//! Periodic tasks that bound memory held by entries and buckets nobody
//! touches anymore. Each spawner returns the task's `JoinHandle` so the
//! server can abort it during graceful shutdown instead of leaking a
//! perpetually-running timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::ratelimit::RateLimiter;

/// Spawns the background task that periodically purges expired cache
/// entries.
///
/// Each tick acquires the store's write lock for the duration of the scan;
/// sweep intervals are coarse and the data set is bounded, so serializing
/// against request handling is acceptable.
pub fn spawn_cache_sweeper<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting cache sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache = cache.write().await;
                cache.purge_expired()
            };

            if removed > 0 {
                info!(removed, "cache sweep removed expired entries");
            } else {
                debug!("cache sweep found no expired entries");
            }
        }
    })
}

/// Spawns the background task that periodically drops rate-limiter buckets
/// for identities idle longer than `max_idle`.
pub fn spawn_bucket_sweeper(
    limiter: Arc<Mutex<RateLimiter>>,
    interval: Duration,
    max_idle: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            max_idle_secs = max_idle.as_secs(),
            "starting rate limiter bucket sweeper"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut limiter = limiter.lock().await;
                limiter.sweep_idle(max_idle)
            };

            if removed > 0 {
                info!(removed, "bucket sweep dropped idle identities");
            } else {
                debug!("bucket sweep found no idle identities");
            }
        }
    })
}
