use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::CredentialStore;
use crate::config::AppConfig;
use crate::database::assignment::AssignmentRepository;
use crate::database::models::EntitySchema;
use crate::database::repository::Repository;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    pub fn repository(&self, entity: &'static EntitySchema) -> Repository {
        Repository::new(entity, self.pool.clone())
    }

    pub fn assignments(&self) -> AssignmentRepository {
        AssignmentRepository::new(self.pool.clone())
    }

    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::new(self.pool.clone(), self.config.security.min_password_length)
    }
}
