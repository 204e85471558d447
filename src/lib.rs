//! userhub - A small users HTTP API
//!
//! CRUD and search over a users collection, decorated with a bounded
//! TTL + LRU cache for search responses and a per-client token-bucket
//! rate limiter.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod ratelimit;
pub mod repo;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_bucket_sweeper, spawn_cache_sweeper};
