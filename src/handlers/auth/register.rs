// handlers/auth/register.rs - POST /register handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::auth::NewUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn register_post(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(new_user) = body?;
    let id = state.credentials().register(new_user).await?;
    Ok(ApiResponse::created(json!({ "id": id })))
}
