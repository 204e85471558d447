//! Background Tasks Module
//!
//! Periodic maintenance that runs for the lifetime of the server:
//! - Cache sweep: removes expired cache entries at configured intervals
//! - Bucket sweep: drops rate-limiter buckets for idle identities

mod sweep;

pub use sweep::{spawn_bucket_sweeper, spawn_cache_sweeper};
