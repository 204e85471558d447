//! Response DTOs for the users API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! plain domain objects.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Number of users currently stored
    pub user_count: usize,
}

impl HealthResponse {
    /// Creates a new HealthResponse with the current timestamp.
    pub fn healthy(user_count: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            user_count,
        }
    }
}

/// Cache section of the metrics payload.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub size: usize,
    pub max_size: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub evictions: u64,
    /// hits / (hits + misses), 0.0 when nothing has been read yet
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            size: stats.size,
            max_size: stats.max_size,
            hit_count: stats.hit_count,
            miss_count: stats.miss_count,
            evictions: stats.evictions,
            hit_rate,
        }
    }
}

/// Rate limiter section of the metrics payload.
#[derive(Debug, Clone, Serialize)]
pub struct LimiterStatsResponse {
    /// Number of client identities currently holding a bucket
    pub tracked_identities: usize,
}

/// Response body for the metrics endpoint (GET /metrics), merging the
/// counters both cross-cutting components expose.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    pub cache: CacheStatsResponse,
    pub rate_limiter: LimiterStatsResponse,
}

impl MetricsResponse {
    /// Merges a cache snapshot and the limiter's identity count.
    pub fn new(cache: CacheStats, tracked_identities: usize) -> Self {
        Self {
            cache: cache.into(),
            rate_limiter: LimiterStatsResponse { tracked_identities },
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
