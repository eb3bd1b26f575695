use super::column::{ColumnDef, DefaultValue};
use super::schema::{EntitySchema, OrderBy, Projection};

pub static PROJECTS: EntitySchema = EntitySchema {
    name: "projects",
    label: "Project",
    columns: &[
        ColumnDef::text("name").required(),
        ColumnDef::uuid("client_id").required(),
        ColumnDef::text("address").required(),
        ColumnDef::date("start_date").required(),
        ColumnDef::date("end_date").required(),
        ColumnDef::text("status").default_to(DefaultValue::Text("Planning")),
        ColumnDef::numeric("budget").required(),
    ],
    aliases: &[],
    filters: &["client_id"],
    order: &[OrderBy::asc("name")],
    // Listings show the owning client's name next to its id
    projection: Some(Projection {
        select: "c.name AS client_name",
        join: "LEFT JOIN clients c ON c.id = t.client_id",
    }),
};

pub static PROJECT_SERVICES: EntitySchema = EntitySchema {
    name: "project_services",
    label: "Project service",
    columns: &[
        ColumnDef::uuid("project_id").required(),
        ColumnDef::text("name").required(),
        ColumnDef::text("duration"),
        ColumnDef::date("start_date").required(),
        ColumnDef::date("end_date").required(),
        ColumnDef::numeric("progress").default_to(DefaultValue::Numeric(0)),
        ColumnDef::numeric("cost").required(),
        ColumnDef::text("unit"),
        ColumnDef::numeric("measure"),
    ],
    aliases: &[],
    filters: &["project_id"],
    order: &[OrderBy::asc("name")],
    projection: None,
};
