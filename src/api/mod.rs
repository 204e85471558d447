//! API Module
//!
//! HTTP handlers, middleware, and routing for the users API.
//!
//! # Endpoints
//! - `GET /users` - List all users
//! - `POST /users` - Create a user
//! - `GET /users/search` - Filtered, sorted, paginated search (cached)
//! - `GET /users/:id` - Fetch a user
//! - `PUT /users/:id` - Update a user
//! - `DELETE /users/:id` - Delete a user
//! - `GET /health` - Health check
//! - `GET /metrics` - Cache and rate limiter statistics

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::{AppState, SearchPage};
pub use routes::create_router;
