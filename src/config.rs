//! Configuration Module
//!
//! Handles loading and managing server configuration from environment
//! variables. These are internal tuning knobs, not user input: zero or
//! unparsable values are corrected to the documented defaults rather than
//! rejected.

use std::env;

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of cached search responses
    pub max_items: usize,
    /// Background sweep interval in seconds (cache purge and idle-bucket
    /// eviction)
    pub cleanup_interval: u64,
    /// TTL in seconds applied to cached search responses
    pub cache_ttl: u64,
    /// Rate limiter refill rate, tokens per second
    pub rate_limit_rate: f64,
    /// Rate limiter burst allowance (bucket size)
    pub rate_limit_burst: f64,
    /// Seconds a rate-limiter bucket may sit idle before the sweeper drops it
    pub rate_limit_idle: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `MAX_ITEMS` - Maximum cached responses (default: 1000)
    /// - `CLEANUP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    /// - `CACHE_TTL_SECS` - Search response TTL in seconds (default: 300)
    /// - `RATE_LIMIT_RATE` - Tokens per second (default: 100)
    /// - `RATE_LIMIT_BURST` - Bucket size (default: 1000)
    /// - `RATE_LIMIT_IDLE_SECS` - Idle-bucket threshold (default: 300)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            max_items: nonzero_or(env_or("MAX_ITEMS", defaults.max_items), defaults.max_items),
            cleanup_interval: nonzero_or(
                env_or("CLEANUP_INTERVAL_SECS", defaults.cleanup_interval),
                defaults.cleanup_interval,
            ),
            cache_ttl: nonzero_or(env_or("CACHE_TTL_SECS", defaults.cache_ttl), defaults.cache_ttl),
            rate_limit_rate: env_or("RATE_LIMIT_RATE", defaults.rate_limit_rate),
            rate_limit_burst: env_or("RATE_LIMIT_BURST", defaults.rate_limit_burst),
            rate_limit_idle: nonzero_or(
                env_or("RATE_LIMIT_IDLE_SECS", defaults.rate_limit_idle),
                defaults.rate_limit_idle,
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            max_items: 1000,
            cleanup_interval: 60,
            cache_ttl: 300,
            rate_limit_rate: 100.0,
            rate_limit_burst: 1000.0,
            rate_limit_idle: 300,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn nonzero_or<T: PartialEq + From<u8>>(value: T, default: T) -> T {
    if value == T::from(0) {
        default
    } else {
        value
    }
}
