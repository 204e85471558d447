//! userhub - A small users HTTP API
//!
//! CRUD and search over a users collection, decorated with a bounded
//! TTL + LRU cache for search responses and a per-client token-bucket
//! rate limiter.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod ratelimit;
mod repo;
mod tasks;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::{spawn_bucket_sweeper, spawn_cache_sweeper};

/// Main entry point for the userhub API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct shared state: repository, cache, rate limiter
/// 4. Start the background sweep tasks
/// 5. Create the Axum router with all endpoints and middleware
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userhub=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting userhub API server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, max_items={}, cleanup_interval={}s, cache_ttl={}s, rate={}/s, burst={}, idle={}s",
        config.server_port,
        config.max_items,
        config.cleanup_interval,
        config.cache_ttl,
        config.rate_limit_rate,
        config.rate_limit_burst,
        config.rate_limit_idle,
    );

    let state = AppState::from_config(&config);
    info!("Shared state initialized");

    // Background maintenance: expired cache entries and idle limiter buckets
    let cache_sweeper = spawn_cache_sweeper(
        state.cache.clone(),
        Duration::from_secs(config.cleanup_interval),
    );
    let bucket_sweeper = spawn_bucket_sweeper(
        state.limiter.clone(),
        Duration::from_secs(config.cleanup_interval),
        Duration::from_secs(config.rate_limit_idle),
    );
    info!("Background sweepers started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // connect_info makes the peer address available to the rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(cache_sweeper, bucket_sweeper))
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep tasks so no timers outlive the
/// server.
async fn shutdown_signal(cache_sweeper: JoinHandle<()>, bucket_sweeper: JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cache_sweeper.abort();
    bucket_sweeper.abort();
    warn!("Background sweepers aborted");
}
