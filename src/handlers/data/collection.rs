// handlers/data/collection.rs - GET/POST /:entity handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use super::utils::{json_body, resolve_entity};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /:entity - list records, optionally filtered by a parent id
/// (e.g. `?project_id=...`). Unrecognized parameters are ignored.
pub async fn entity_get(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<Value>> {
    let entity = resolve_entity(&entity)?;
    let records = state.repository(entity).list(&params).await?;
    Ok(ApiResponse::success(records))
}

/// POST /:entity - create a record, responding 201 with its new id
pub async fn entity_post(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let entity = resolve_entity(&entity)?;
    let input = json_body(body)?;
    let id = state.repository(entity).create(input).await?;
    Ok(ApiResponse::created(json!({ "id": id })))
}
