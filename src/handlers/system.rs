// handlers/system.rs - GET / and GET /health

use axum::{extract::State, response::IntoResponse};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::models::ENTITIES;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

pub async fn root() -> ApiResponse<Value> {
    let entities: Vec<&str> = ENTITIES.iter().map(|e| e.name).collect();

    ApiResponse::success(json!({
        "name": "Obra API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Construction-project monitoring API",
        "endpoints": {
            "health": "GET /health",
            "auth": "POST /register, POST /login, GET /auth/whoami (bearer token)",
            "entities": "GET|POST /:entity, GET|PUT|DELETE /:entity/:id",
            "assignments": "GET|POST|DELETE /project_team_members",
        },
        "entities": entities,
    }))
}

/// Database ping; 503 when the pool cannot reach the server.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        }))
        .into_response(),
        Err(_) => ApiError::service_unavailable("Database unavailable").into_response(),
    }
}
