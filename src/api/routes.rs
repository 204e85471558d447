//! API Routes
//!
//! Configures the Axum router with all users API endpoints.

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_user, delete_user, get_user, health, list_users, metrics, search_users, update_user,
    AppState,
};
use super::middleware::rate_limit;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /users` - List all users
/// - `POST /users` - Create a user
/// - `GET /users/search` - Filtered, sorted, paginated search (cached)
/// - `GET /users/:id` - Fetch a user
/// - `PUT /users/:id` - Update a user
/// - `DELETE /users/:id` - Delete a user
/// - `GET /health` - Health check
/// - `GET /metrics` - Cache and rate limiter statistics
///
/// # Middleware
/// - Rate limiting: every route, rejected requests never reach a handler
/// - CORS: allows any origin (configurable for production)
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/search", get(search_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
