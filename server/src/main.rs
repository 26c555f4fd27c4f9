//! User API server: loads config from `CONFIG_PATH`, connects to PostgreSQL,
//! applies migrations and serves the user routes.
//!
//! Run from repo root: `CONFIG_PATH=config/local.json cargo run -p server`

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use user_api::{app, apply_migrations, config, store, AppConfig, AppState, PgUserStore};

const DEFAULT_FILTER: &str = "user_api=info,server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load()?;
    init_tracing(&cfg);
    tracing::info!(env = %cfg.env, "starting server");

    if cfg.postgres.ensure_database {
        store::ensure_database_exists(&cfg.postgres).await?;
    }

    tracing::info!(host = %cfg.postgres.host, dbname = %cfg.postgres.dbname, "connecting to database");
    let pool = match store::connect(&cfg.postgres).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };
    tracing::info!("connected to database");

    if let Err(e) = apply_migrations(&pool).await {
        tracing::error!(error = %e, "migration failed");
        std::process::exit(1);
    }

    let state = AppState::new(Arc::new(PgUserStore::new(pool)))
        .with_status_mode(cfg.http_server.status_mode);
    let router = app(state, cfg.http_server.timeout());

    let listener = TcpListener::bind(&cfg.http_server.address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server shutdown complete");
    Ok(())
}

fn init_tracing(cfg: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if cfg.is_local() {
        builder.init();
    } else {
        builder.json().init();
    }
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
