use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::database::record::RecordError;
use crate::types::Operation;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Map a driver error onto the API taxonomy using the SQLSTATE code.
    ///
    /// A foreign-key violation means "still referenced" on delete but
    /// "parent does not exist" on insert and update.
    pub fn classify(err: sqlx::Error, operation: Operation, label: &str) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return DatabaseError::NotFound(format!("{label} not found"));
        }

        let details = err.as_database_error().map(|db_err| {
            (
                db_err.code().map(|c| c.into_owned()),
                db_err.constraint().unwrap_or("unknown").to_string(),
                db_err.message().to_string(),
            )
        });
        let Some((code, constraint, message)) = details else {
            return DatabaseError::Sqlx(err);
        };

        match code.as_deref() {
            Some("23505") => {
                DatabaseError::Conflict(format!("{label} already exists ({constraint})"))
            }
            Some("23503") if operation == Operation::Delete => DatabaseError::Conflict(format!(
                "{label} is still referenced by other records ({constraint})"
            )),
            Some("23503") => {
                DatabaseError::Validation(format!("Referenced record does not exist ({constraint})"))
            }
            Some("23502") => DatabaseError::Validation(format!("Required value missing: {message}")),
            Some("22P02" | "22001" | "22003" | "22007" | "22008" | "23514") => {
                DatabaseError::Validation(message)
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

/// Builds the shared connection pool and owns schema migrations.
///
/// There is no process-wide pool: the pool returned here is carried in
/// `AppState` and handed to repositories explicitly.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool and verify the server is reachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let options = Self::connect_options(config)?;
        let pool = Self::pool_options(config).connect_with(options).await?;
        info!(
            max_connections = config.max_connections,
            "Created database pool"
        );
        Ok(pool)
    }

    /// Pool that only connects on first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let options = Self::connect_options(config)?;
        Ok(Self::pool_options(config).connect_lazy_with(options))
    }

    fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
        Self::validate_url(&config.url)?;
        let options: PgConnectOptions = config.url.parse()?;
        if config.enable_query_logging {
            Ok(options)
        } else {
            Ok(options.disable_statement_logging())
        }
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    fn validate_url(url: &str) -> Result<(), DatabaseError> {
        if url.is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }
        let parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        match parsed.scheme() {
            "postgres" | "postgresql" => Ok(()),
            _ => Err(DatabaseError::InvalidDatabaseUrl),
        }
    }

    /// Apply the embedded migrations in `migrations/`
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
            warn!(error = %e, "Database health check failed");
            DatabaseError::from(e)
        })?;
        Ok(())
    }
}
