//! Rate Limiting Module
//!
//! Token-bucket rate limiting keyed by caller-supplied identity. The
//! limiter is transport-agnostic: it sees a string identity and answers
//! allow/reject, nothing more.

mod limiter;

pub use limiter::RateLimiter;
