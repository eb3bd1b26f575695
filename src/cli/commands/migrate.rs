use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(database = %config.redacted_database_url(), "Running migrations");

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::migrate(&pool)
        .await
        .context("failed to apply migrations")?;
    pool.close().await;
    Ok(())
}
