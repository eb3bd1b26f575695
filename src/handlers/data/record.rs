// handlers/data/record.rs - GET/PUT/DELETE /:entity/:id handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use super::utils::{json_body, parse_record_id, resolve_entity};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn record_get(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let entity = resolve_entity(&entity)?;
    let id = parse_record_id(&id)?;
    let record = state.repository(entity).select_404(id).await?;
    Ok(ApiResponse::success(record))
}

/// PUT /:entity/:id - partial update; only the supplied fields change
pub async fn record_put(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let entity = resolve_entity(&entity)?;
    let id = parse_record_id(&id)?;
    let changes = json_body(body)?;
    let id = state.repository(entity).update(id, changes).await?;
    Ok(ApiResponse::success(json!({ "id": id })))
}

pub async fn record_delete(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let entity = resolve_entity(&entity)?;
    let id = parse_record_id(&id)?;
    let id = state.repository(entity).delete(id).await?;
    Ok(ApiResponse::success(json!({ "id": id })))
}
