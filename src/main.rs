//! Inventory API - an authenticated inventory service with a read-through
//! item cache
//!
//! Items are cached for a bounded time and invalidated on every mutation.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_api::cache::{CacheBackend, MemoryBackend, RedisBackend};
use inventory_api::{create_router, spawn_cleanup_task, AppState, Config};

/// Main entry point for the inventory server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the cache backend (Redis when configured, in-memory otherwise)
/// 4. Start the background TTL cleanup task for the in-memory backend
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Inventory API server");

    let config = Config::from_env();
    info!(
        port = config.server_port,
        cache_ttl_secs = config.cache_ttl,
        redis = config.redis_url.is_some(),
        "Configuration loaded"
    );
    if config.uses_dev_secret() {
        warn!("JWT_SECRET is not set, signing tokens with the development secret");
    }

    let (backend, cleanup_handle) = build_backend(&config).await?;
    let state = AppState::from_config(&config, backend);
    let cache = state.cache.clone();

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
    if let Err(err) = cache.shutdown().await {
        warn!(error = %err, "Cache backend shutdown failed");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Connects the configured cache backend. The in-memory backend comes with
/// a cleanup task; Redis expires keys on its own.
async fn build_backend(
    config: &Config,
) -> anyhow::Result<(Arc<dyn CacheBackend>, Option<JoinHandle<()>>)> {
    match &config.redis_url {
        Some(url) => {
            let backend = RedisBackend::connect(url)
                .await
                .context("failed to connect to Redis cache backend")?;
            info!("Using Redis cache backend");
            Ok((Arc::new(backend), None))
        }
        None => {
            let backend = MemoryBackend::new(config.cache_max_entries);
            let handle = spawn_cleanup_task(backend.store(), config.cleanup_interval);
            info!(
                max_entries = config.cache_max_entries,
                "Using in-memory cache backend"
            );
            Ok((Arc::new(backend), Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
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
}
