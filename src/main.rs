//! tenant_orders server binary
//!
//! # Startup Sequence
//! 1. Initialize tracing (`RUST_LOG`, `LOG_FORMAT=json` for JSON lines)
//! 2. Load and validate configuration from environment variables
//! 3. Build the response cache, repository, authenticator and rate limiter
//! 4. Start the background cache expiry sweep
//! 5. Serve the router until SIGINT/SIGTERM

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tenant_orders::{create_router, spawn_cleanup_task, AppState, Config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tenant_orders=info,tower_http=info".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting tenant_orders server");

    let config = Config::from_env();
    let state = AppState::from_config(&config).inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;
    info!(
        port = config.server_port,
        cache_max_entries = config.cache_max_entries,
        cache_ttl_seconds = config.cache_ttl_seconds,
        cleanup_interval = config.cache_cleanup_interval,
        rate_limit_max = config.rate_limit_max,
        rate_limit_window_ms = config.rate_limit_window_ms,
        "Configuration loaded"
    );

    let cleanup_handle = spawn_cleanup_task(state.cache.store(), config.cache_cleanup_interval);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then stops the expiry sweep.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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

    cleanup_handle.abort();
    warn!("Cache sweep aborted");
}
