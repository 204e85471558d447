//! Request and Response models for the users API
//!
//! DTOs for serializing/deserializing HTTP request and response bodies,
//! plus the query-parameter model shared by the search endpoint and the
//! cache-key encoding.

pub mod query;
pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use query::{PaginatedResponse, Pagination, QueryParams};
pub use requests::UserPayload;
pub use responses::{
    CacheStatsResponse, ErrorResponse, HealthResponse, LimiterStatsResponse, MetricsResponse,
};
pub use user::User;
