//! Token-Bucket Rate Limiter
//!
//! Tracks a floating-point token balance per client identity, refilled
//! continuously from elapsed time. Each permitted request consumes one
//! token; an empty bucket rejects without consuming anything.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

// == Token Bucket ==
/// Per-identity limiter state. Invariant: `0 <= tokens <= bucket_size`.
#[derive(Debug)]
struct TokenBucket {
    /// Current token balance
    tokens: f64,
    /// When the balance was last recomputed
    last_refill: Instant,
}

// == Rate Limiter ==
/// Token-bucket rate limiter with one bucket per client identity.
///
/// Buckets are created lazily, starting with a full burst allowance, and
/// refill continuously at `rate` tokens per second up to `bucket_size`.
/// `rate` and `bucket_size` are trusted construction-time configuration.
///
/// The whole read-refill-decide-consume sequence for one call runs under
/// the caller's exclusive lock, so two concurrent requests can never both
/// spend the same token.
#[derive(Debug)]
pub struct RateLimiter {
    /// Tokens added per second
    rate: f64,
    /// Maximum token balance, i.e. burst allowance
    bucket_size: f64,
    /// Per-identity buckets, created on first sight
    buckets: HashMap<String, TokenBucket>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a new rate limiter refilling at `rate` tokens per second
    /// with a burst allowance of `bucket_size`.
    pub fn new(rate: f64, bucket_size: f64) -> Self {
        Self {
            rate,
            bucket_size,
            buckets: HashMap::new(),
        }
    }

    // == Allow ==
    /// Decides whether one request from `identity` may proceed.
    ///
    /// An unknown identity starts with a full bucket. Known identities are
    /// refilled from the elapsed time first; `last_refill` advances whether
    /// or not the request is ultimately allowed. With less than one token
    /// available the request is rejected and nothing is consumed.
    pub fn allow(&mut self, identity: &str) -> bool {
        let now = Instant::now();

        let bucket = self
            .buckets
            .entry(identity.to_string())
            .or_insert(TokenBucket {
                tokens: self.bucket_size,
                last_refill: now,
            });

        // A just-created bucket sees zero elapsed time, so the refill below
        // is a no-op for it.
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.rate).min(self.bucket_size);
        bucket.last_refill = now;

        if bucket.tokens < 1.0 {
            return false;
        }

        bucket.tokens -= 1.0;
        true
    }

    // == Sweep Idle ==
    /// Removes buckets that have not seen a request for at least `max_idle`.
    ///
    /// Returns the number of buckets removed. `max_idle` is clamped to the
    /// full-refill time (`bucket_size / rate` seconds): past that point an
    /// idle bucket would have refilled to full anyway, so dropping it is
    /// indistinguishable from the identity showing up fresh.
    pub fn sweep_idle(&mut self, max_idle: Duration) -> usize {
        let full_refill = Duration::from_secs_f64(self.bucket_size / self.rate);
        let max_idle = max_idle.max(full_refill);

        let now = Instant::now();
        let before = self.buckets.len();
        self.buckets
            .retain(|_, bucket| now.duration_since(bucket.last_refill) < max_idle);

        let removed = before - self.buckets.len();
        if removed > 0 {
            debug!(removed, "swept idle rate limiter buckets");
        }
        removed
    }

    // == Tracked Identities ==
    /// Returns the number of identities currently holding a bucket.
    pub fn tracked_identities(&self) -> usize {
        self.buckets.len()
    }
}
