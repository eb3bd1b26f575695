use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::column::ColumnDef;
use super::schema::{EntitySchema, OrderBy};

pub static TEAM_MEMBERS: EntitySchema = EntitySchema {
    name: "team_members",
    label: "Team member",
    columns: &[
        ColumnDef::text("name").required(),
        ColumnDef::text("role"),
        ColumnDef::text("email").required(),
        ColumnDef::text("phone"),
        ColumnDef::text("cpf"),
        ColumnDef::date("hiring_date"),
        ColumnDef::text("access_level"),
        ColumnDef::text("notes"),
    ],
    aliases: &[],
    filters: &[],
    order: &[OrderBy::asc("name")],
    projection: None,
};

/// Input shape of the project/team-member association. Not routed through
/// the generic repository; only used to validate request bodies.
pub static PROJECT_TEAM_MEMBERS: EntitySchema = EntitySchema {
    name: "project_team_members",
    label: "Assignment",
    columns: &[
        ColumnDef::uuid("project_id").required(),
        ColumnDef::uuid("team_member_id").required(),
    ],
    aliases: &[],
    filters: &["project_id", "team_member_id"],
    order: &[
        OrderBy::asc("assigned_at"),
        OrderBy::asc("project_id"),
        OrderBy::asc("team_member_id"),
    ],
    projection: None,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectTeamMember {
    pub project_id: Uuid,
    pub team_member_id: Uuid,
    pub assigned_at: Option<DateTime<Utc>>,
}
