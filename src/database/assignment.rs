use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::team::PROJECT_TEAM_MEMBERS;
use crate::database::models::ProjectTeamMember;
use crate::database::record::{parse_filters, Record, RecordError};
use crate::types::Operation;

const COLUMNS: &str = "project_id, team_member_id, assigned_at";

/// The composite-key link between projects and team members.
#[derive(Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

/// Both halves of an assignment key, validated from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentKey {
    pub project_id: Uuid,
    pub team_member_id: Uuid,
}

impl AssignmentKey {
    pub fn from_json(input: Value) -> Result<Self, RecordError> {
        let record = Record::for_create(&PROJECT_TEAM_MEMBERS, input)?;
        match (
            record.get_uuid("project_id"),
            record.get_uuid("team_member_id"),
        ) {
            (Some(project_id), Some(team_member_id)) => Ok(Self {
                project_id,
                team_member_id,
            }),
            _ => Err(RecordError::MissingRequiredFields(vec![
                "project_id",
                "team_member_id",
            ])),
        }
    }
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn assign(&self, key: AssignmentKey) -> Result<ProjectTeamMember, DatabaseError> {
        let query = format!(
            "INSERT INTO project_team_members (project_id, team_member_id) \
             VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let classify = |e| DatabaseError::classify(e, Operation::Create, PROJECT_TEAM_MEMBERS.label);

        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, ProjectTeamMember>(&query)
            .bind(key.project_id)
            .bind(key.team_member_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(classify)?;
        tx.commit().await.map_err(classify)?;

        info!(project_id = %key.project_id, team_member_id = %key.team_member_id, "Team member assigned");
        Ok(row)
    }

    /// List assignments, optionally narrowed by either side of the key.
    pub async fn list(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<ProjectTeamMember>, DatabaseError> {
        let filters = parse_filters(&PROJECT_TEAM_MEMBERS, params)?;
        let filter = |name: &str| filters.iter().find(|(f, _)| *f == name).map(|(_, id)| *id);

        let query = format!(
            "SELECT {COLUMNS} FROM project_team_members \
             WHERE ($1::uuid IS NULL OR project_id = $1) \
               AND ($2::uuid IS NULL OR team_member_id = $2) \
             ORDER BY assigned_at ASC, project_id ASC, team_member_id ASC"
        );
        sqlx::query_as::<_, ProjectTeamMember>(&query)
            .bind(filter("project_id"))
            .bind(filter("team_member_id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::classify(e, Operation::Select, PROJECT_TEAM_MEMBERS.label))
    }

    pub async fn unassign(&self, key: AssignmentKey) -> Result<ProjectTeamMember, DatabaseError> {
        let query = format!(
            "DELETE FROM project_team_members \
             WHERE project_id = $1 AND team_member_id = $2 RETURNING {COLUMNS}"
        );
        let classify = |e| DatabaseError::classify(e, Operation::Delete, PROJECT_TEAM_MEMBERS.label);

        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, ProjectTeamMember>(&query)
            .bind(key.project_id)
            .bind(key.team_member_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(classify)?;
        tx.commit().await.map_err(classify)?;

        info!(project_id = %key.project_id, team_member_id = %key.team_member_id, "Team member unassigned");
        Ok(row)
    }
}
