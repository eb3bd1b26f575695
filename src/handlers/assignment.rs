// handlers/assignment.rs - /project_team_members handlers
//
// The association has a composite key, so POST and DELETE carry both ids in
// the body and GET filters through the query string.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::database::assignment::AssignmentKey;
use crate::database::models::ProjectTeamMember;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn assignment_get(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<ProjectTeamMember>> {
    let rows = state.assignments().list(&params).await?;
    Ok(ApiResponse::success(rows))
}

pub async fn assignment_post(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ProjectTeamMember> {
    let Json(input) = body?;
    let key = AssignmentKey::from_json(input)?;
    let row = state.assignments().assign(key).await?;
    Ok(ApiResponse::created(row))
}

pub async fn assignment_delete(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ProjectTeamMember> {
    let Json(input) = body?;
    let key = AssignmentKey::from_json(input)?;
    let row = state.assignments().unassign(key).await?;
    Ok(ApiResponse::success(row))
}
