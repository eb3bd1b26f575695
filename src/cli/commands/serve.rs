use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::router::app;
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Bind address (overrides HOST)")]
    pub host: Option<String>,

    #[arg(long, short, help = "Listen port (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Skip migrations even when DATABASE_RUN_MIGRATIONS is set")]
    pub no_migrate: bool,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    info!(
        environment = ?config.environment,
        database = %config.redacted_database_url(),
        "Starting Obra API"
    );

    if config.is_production() && config.security.cors_origins.is_empty() {
        warn!("SECURITY_CORS_ORIGINS is empty; browser clients will be refused");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.run_migrations && !args.no_migrate {
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to apply migrations")?;
    }

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Obra API listening on http://{}", bind_addr);

    let state = AppState::new(pool.clone(), config);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
