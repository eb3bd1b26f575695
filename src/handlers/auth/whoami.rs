// handlers/auth/whoami.rs - GET /auth/whoami handler

use axum::Extension;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Echo the claims of the bearer token checked by `jwt_auth_middleware`.
pub async fn whoami_get(Extension(user): Extension<AuthUser>) -> ApiResult<AuthUser> {
    Ok(ApiResponse::success(user))
}
