//! Rate Limiting Middleware
//!
//! Wraps every route: derives the client identity, asks the limiter for a
//! decision, and short-circuits with 429 before the handler runs when the
//! client's bucket is empty.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ApiError;

use super::handlers::AppState;

/// Identity used when no peer address or forwarding header is available
/// (e.g. requests driven in-process during tests).
const UNKNOWN_IDENTITY: &str = "unknown";

/// Middleware implementing per-client rate limiting.
///
/// The limiter call is the only work done while holding the bucket lock;
/// the wrapped handler runs outside it.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let identity = client_identity(&request);

    let allowed = {
        let mut limiter = state.limiter.lock().await;
        limiter.allow(&identity)
    };

    if !allowed {
        warn!(identity = %identity, "rate limit exceeded");
        return ApiError::TooManyRequests.into_response();
    }

    next.run(request).await
}

/// Derives the identity the limiter tracks: the peer address when the
/// server provides it, else the first hop of `x-forwarded-for`, else a
/// fixed sentinel so the decision is still total.
fn client_identity(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN_IDENTITY.to_string())
}
