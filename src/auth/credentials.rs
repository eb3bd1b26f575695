use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::database::manager::DatabaseError;
use crate::database::models::User;
use crate::types::Operation;

const DEFAULT_ROLE: &str = "User";

/// Verified against when the email is unknown, so a miss costs the same
/// Argon2 work as a wrong password.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| hash_password("obra-api-timing-equalizer").unwrap_or_default());

#[derive(Debug, Error)]
pub enum CredentialError {
    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("Invalid email or password")]
    Unauthenticated,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("{0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for CredentialError {
    fn from(err: sqlx::Error) -> Self {
        CredentialError::Database(DatabaseError::Sqlx(err))
    }
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// What a successful login reveals about the account.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
        }
    }
}

/// Password credentials backed by the `users` table.
#[derive(Clone)]
pub struct CredentialStore {
    pool: PgPool,
    min_password_length: usize,
}

impl CredentialStore {
    pub fn new(pool: PgPool, min_password_length: usize) -> Self {
        Self {
            pool,
            min_password_length,
        }
    }

    /// Validate a registration without touching the database.
    pub fn validate_registration(&self, input: &NewUser) -> Result<String, CredentialError> {
        let email = normalize_email(&input.email);
        validate_email_format(&email).map_err(CredentialError::Validation)?;
        if input.password.is_empty() {
            return Err(CredentialError::Validation("Password is required".to_string()));
        }
        validate_password_strength(&input.password, self.min_password_length)
            .map_err(CredentialError::Validation)?;
        Ok(email)
    }

    pub async fn register(&self, input: NewUser) -> Result<Uuid, CredentialError> {
        let email = self.validate_registration(&input)?;
        let password_hash = hash_blocking(input.password).await?;
        let role = input
            .role
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        let mut tx = self.pool.begin().await?;
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (email, password_hash, name, role) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(&input.name)
        .bind(&role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match DatabaseError::classify(e, Operation::Create, "User") {
            DatabaseError::Conflict(_) => CredentialError::EmailTaken,
            other => CredentialError::Database(other),
        })?;
        tx.commit().await?;

        info!(user_id = %id, "User registered");
        Ok(id)
    }

    /// Check an email/password pair.
    ///
    /// Both a wrong password and an unknown email yield `Unauthenticated`,
    /// after the same amount of hashing work.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile, CredentialError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(CredentialError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name, role, created_at FROM users WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let (hash, user) = match user {
            Some(user) => (user.password_hash.clone(), Some(user)),
            None => (DUMMY_HASH.clone(), None),
        };
        let verified = verify_blocking(password.to_string(), hash).await?;

        match user {
            Some(user) if verified => Ok(UserProfile::from(user)),
            Some(user) => {
                warn!(user_id = %user.id, "Login rejected: wrong password");
                Err(CredentialError::Unauthenticated)
            }
            None => {
                warn!("Login rejected: unknown email");
                Err(CredentialError::Unauthenticated)
            }
        }
    }
}

async fn hash_blocking(password: String) -> Result<String, CredentialError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CredentialError::Hashing(e.to_string()))?
        .map_err(|e| CredentialError::Hashing(e.to_string()))
}

/// A stored hash that cannot be parsed counts as a failed verification.
async fn verify_blocking(password: String, hash: String) -> Result<bool, CredentialError> {
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;
    Ok(verified.unwrap_or(false))
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Invalid email format".to_string());
    };
    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}
