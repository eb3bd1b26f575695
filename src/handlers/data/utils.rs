use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{find_entity, EntitySchema};
use crate::error::ApiError;

/// Unknown entity names are a 404, same as an unknown route.
pub fn resolve_entity(name: &str) -> Result<&'static EntitySchema, ApiError> {
    find_entity(name).ok_or_else(|| ApiError::not_found(format!("Unknown entity: {name}")))
}

pub fn parse_record_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::validation_error(format!("Invalid id format: {raw}"), None))
}

pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    let Json(value) = body?;
    Ok(value)
}
