//! API Handlers
//!
//! HTTP request handlers for the users API. Handlers are the consumers of
//! the cache: they build canonical keys from the request parameters and
//! treat hit/miss as ordinary control flow.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    HealthResponse, MetricsResponse, PaginatedResponse, QueryParams, User, UserPayload,
};
use crate::ratelimit::RateLimiter;
use crate::repo::UserRepo;

/// The response shape the search endpoint caches.
pub type SearchPage = PaginatedResponse<User>;

/// Application state shared across all handlers.
///
/// Every cross-cutting component is constructed once at startup and passed
/// around by handle; nothing here is a process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    /// Users collection
    pub repo: Arc<RwLock<UserRepo>>,
    /// Search-response cache
    pub cache: Arc<RwLock<CacheStore<SearchPage>>>,
    /// Per-client token buckets
    pub limiter: Arc<Mutex<RateLimiter>>,
    /// TTL applied to cached search responses
    pub cache_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState from explicit component parameters.
    pub fn new(max_items: usize, rate: f64, burst: f64, cache_ttl: Duration) -> Self {
        Self {
            repo: Arc::new(RwLock::new(UserRepo::new())),
            cache: Arc::new(RwLock::new(CacheStore::new(max_items))),
            limiter: Arc::new(Mutex::new(RateLimiter::new(rate, burst))),
            cache_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_items,
            config.rate_limit_rate,
            config.rate_limit_burst,
            Duration::from_secs(config.cache_ttl),
        )
    }
}

/// Handler for GET /users
///
/// Lists all users ordered by id.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let repo = state.repo.read().await;
    Json(repo.list())
}

/// Handler for POST /users
///
/// Creates a user from a validated payload; responds 201 with the stored
/// record including its assigned id.
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<User>)> {
    if let Some(message) = payload.validate() {
        return Err(ApiError::InvalidRequest(message));
    }

    let mut repo = state.repo.write().await;
    let user = repo.create(payload);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>> {
    let repo = state.repo.read().await;
    repo.get(id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("user {id}")))
}

/// Handler for PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>> {
    if let Some(message) = payload.validate() {
        return Err(ApiError::InvalidRequest(message));
    }

    let mut repo = state.repo.write().await;
    repo.update(id, payload)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("user {id}")))
}

/// Handler for DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    let mut repo = state.repo.write().await;
    if repo.delete(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("user {id}")))
    }
}

/// Handler for GET /users/search
///
/// Consults the cache under the canonical key for the normalized parameter
/// set before touching the repository; misses run the search and store the
/// page with the configured TTL. Staleness after user mutations is bounded
/// by that TTL.
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Json<SearchPage> {
    let params = params.normalized();
    let cache_key = params.cache_key();

    {
        let mut cache = state.cache.write().await;
        if let Some(page) = cache.get(&cache_key) {
            debug!(key = %cache_key, "search served from cache");
            return Json(page);
        }
    }

    let page = {
        let repo = state.repo.read().await;
        let (users, total) = repo.search(&params);
        PaginatedResponse::new(users, &params, total)
    };

    {
        let mut cache = state.cache.write().await;
        cache.set(cache_key, page.clone(), state.cache_ttl);
    }

    Json(page)
}

/// Handler for GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let repo = state.repo.read().await;
    Json(HealthResponse::healthy(repo.len()))
}

/// Handler for GET /metrics
///
/// Merges the counters both cross-cutting components expose into one
/// operational payload.
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let cache_stats = {
        let cache = state.cache.read().await;
        cache.stats()
    };
    let tracked = {
        let limiter = state.limiter.lock().await;
        limiter.tracked_identities()
    };

    Json(MetricsResponse::new(cache_stats, tracked))
}
