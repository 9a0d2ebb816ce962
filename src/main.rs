//! Lingua Cache - an AI translation server with a content-addressed cache
//!
//! Deduplicates calls to a paid translation provider and tracks API usage.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Open the SQLite store and run migrations
//! 4. Select the translation provider (OpenAI, or demo without a key)
//! 5. Start the background cache retention task
//! 6. Create Axum router with all endpoints
//! 7. Start HTTP server on configured port
//! 8. Handle graceful shutdown on SIGINT/SIGTERM

mod api;
mod cache;
mod config;
mod db;
mod error;
mod locale;
mod models;
mod provider;
mod ratelimit;
mod stats;
mod tasks;
mod translate;
mod usage;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use db::Db;
use provider::{DemoProvider, OpenAiProvider, TranslationProvider};
use tasks::spawn_retention_task;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lingua_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lingua Cache translation server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, database={}, rate_limit={}/{}s, retention={}d",
        config.server_port,
        config.database_path,
        config.rate_limit_max_requests,
        config.rate_limit_window_secs,
        config.cache_retention_days
    );

    // Open the store and run migrations
    let db = Db::open(&config.database_path).await?;
    info!("Database ready at {}", config.database_path);

    // Select the translation provider
    let provider: Arc<dyn TranslationProvider> = if config.provider_api_key.is_empty() {
        warn!("No provider API key configured, using the demo provider");
        Arc::new(DemoProvider::new())
    } else {
        info!("Using OpenAI provider with model {}", config.provider_model);
        Arc::new(OpenAiProvider::new(&config)?)
    };

    // Start background retention task
    let retention_handle = spawn_retention_task(
        db.clone(),
        config.cleanup_interval_secs,
        config.cache_retention_days,
    );
    info!("Background retention task started");

    // Create router with all endpoints
    let server_port = config.server_port;
    let state = AppState::new(db, provider, config);
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(retention_handle))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the retention task and allows graceful shutdown.
async fn shutdown_signal(retention_handle: tokio::task::JoinHandle<()>) {
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

    // Abort the retention task
    retention_handle.abort();
    warn!("Retention task aborted");
}
