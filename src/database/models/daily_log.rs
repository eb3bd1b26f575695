//! Daily site logs and the activities, costs and photos recorded against them.

use super::column::ColumnDef;
use super::schema::{EntitySchema, OrderBy};

pub static DAILY_LOGS: EntitySchema = EntitySchema {
    name: "daily_logs",
    label: "Daily log",
    columns: &[
        ColumnDef::uuid("project_id").required(),
        ColumnDef::date("log_date").required(),
        ColumnDef::text("weather"),
        ColumnDef::text("personnel"),
        ColumnDef::text("notes"),
        ColumnDef::text("materials_received"),
        ColumnDef::text("equipment_used"),
        ColumnDef::text("occurrences"),
        ColumnDef::numeric("location_lat"),
        ColumnDef::numeric("location_lon"),
    ],
    aliases: &[],
    filters: &["project_id"],
    order: &[OrderBy::desc("log_date")],
    projection: None,
};

pub static DAILY_LOG_ACTIVITIES: EntitySchema = EntitySchema {
    name: "daily_log_activities",
    label: "Daily log activity",
    columns: &[
        ColumnDef::uuid("daily_log_id").required(),
        ColumnDef::text("step_name").required(),
        ColumnDef::text("activity_type"),
        ColumnDef::numeric("quantity"),
        ColumnDef::text("unit"),
        ColumnDef::text("observations"),
    ],
    aliases: &[],
    filters: &["daily_log_id"],
    order: &[OrderBy::desc("created_at")],
    projection: None,
};

pub static DAILY_LOG_COSTS: EntitySchema = EntitySchema {
    name: "daily_log_costs",
    label: "Daily log cost",
    columns: &[
        ColumnDef::uuid("daily_log_id").required(),
        ColumnDef::text("description").required(),
        ColumnDef::numeric("value").required(),
        ColumnDef::text("category"),
        ColumnDef::text("associated_step"),
    ],
    aliases: &[],
    filters: &["daily_log_id"],
    order: &[OrderBy::desc("created_at")],
    projection: None,
};

pub static DAILY_LOG_PHOTOS: EntitySchema = EntitySchema {
    name: "daily_log_photos",
    label: "Daily log photo",
    columns: &[
        ColumnDef::uuid("daily_log_id").required(),
        ColumnDef::text("photo_url").required(),
        ColumnDef::text("description"),
        ColumnDef::date("upload_date"),
        ColumnDef::uuid("uploaded_by"),
    ],
    aliases: &[],
    filters: &["daily_log_id"],
    order: &[OrderBy::desc("upload_date")],
    projection: None,
};
