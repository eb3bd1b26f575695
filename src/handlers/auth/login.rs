// handlers/auth/login.rs - POST /login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub role: Option<String>,
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

pub async fn login_post(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = body?;

    let profile = state
        .credentials()
        .authenticate(&request.email, &request.password)
        .await?;

    let claims = Claims::new(
        profile.id,
        profile.name.clone(),
        profile.role.clone(),
        state.config.security.jwt_expiry_hours,
    );
    let token = generate_jwt(&claims, &state.config.security)?;

    Ok(ApiResponse::success(LoginResponse {
        id: profile.id,
        name: profile.name,
        role: profile.role,
        token,
        expires_in: claims.expires_in(),
    }))
}
