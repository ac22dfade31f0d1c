//! # Stockpile API server
//!
//! Startup order: `.env`, tracing, config, database (migrations), seed
//! roles and the first administrator, then serve until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stockpile_api::auth::{CredentialVault, TokenIssuer};
use stockpile_api::config::AppConfig;
use stockpile_api::services::bootstrap::{self, AdminSeed};
use stockpile_api::{router, AppState};
use stockpile_core::{Clock, SystemClock};
use stockpile_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    info!("Starting Stockpile API...");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        port = config.port,
        database = %config.database_path,
        jwt_exp_secs = config.jwt_exp_secs,
        "Configuration loaded"
    );

    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await
    .context("Failed to open database")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let vault = CredentialVault::default();

    let admin = AdminSeed {
        name: config.admin_name.clone(),
        email: config.admin_email.clone(),
        password: config.admin_password.clone(),
    };
    bootstrap::seed_defaults(&db, &vault, &admin, clock.now())
        .await
        .context("Failed to seed database")?;

    let tokens = TokenIssuer::new(&config.jwt_secret, config.jwt_exp_secs, clock.clone());
    let state = Arc::new(AppState::new(db.clone(), tokens, vault, clock));

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockpile_api=debug,stockpile_db=debug,tower_http=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to listen for Ctrl+C");
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
                error!(?e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
