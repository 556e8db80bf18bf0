//! PrayerHub Server: prayer slot registration service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use prayerhub_core::config::{AppConfig, DatabaseProvider};
use prayerhub_core::error::AppError;
use prayerhub_core::traits::SystemClock;
use prayerhub_database::{DatabasePool, MemoryStore, Stores};
use prayerhub_service::AdminCode;

#[tokio::main]
async fn main() {
    let env = std::env::var("PRAYERHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PrayerHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores ──────────────────────────────────────────
    let (stores, db_pool) = match config.database.provider {
        DatabaseProvider::Postgres => {
            let db_pool = DatabasePool::connect(&config.database).await?;
            db_pool.health_check().await?;

            if config.database.run_migrations {
                prayerhub_database::migration::run_migrations(db_pool.pool()).await?;
            }
            (Stores::postgres(db_pool.pool().clone()), Some(db_pool))
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            (Stores::memory(MemoryStore::new()), None)
        }
    };

    let default_capacity = config.registration.default_capacity;
    if prayerhub_service::seed_global_capacity(stores.settings.as_ref(), default_capacity).await? {
        tracing::warn!(default_capacity, "Global capacity setting was missing; seeded default");
    }

    // ── Step 2: Admin gate ──────────────────────────────────────
    match AdminCode::new(&config.admin.code).fingerprint() {
        Some(fingerprint) => tracing::info!(fingerprint = %fingerprint, "Admin API enabled"),
        None => tracing::warn!("No admin code configured; admin API rejects every request"),
    }

    // ── Step 3: Router ──────────────────────────────────────────
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = prayerhub_api::build_app(config, stores, Arc::new(SystemClock));

    // ── Step 4: Serve ───────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {bind_addr}: {e}")))?;
    tracing::info!("PrayerHub listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Release resources ───────────────────────────────
    if let Some(db_pool) = db_pool {
        if tokio::time::timeout(grace, db_pool.close()).await.is_err() {
            tracing::warn!("Timed out closing database pool");
        }
    }

    tracing::info!("PrayerHub server shut down gracefully");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
