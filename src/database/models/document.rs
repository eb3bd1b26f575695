use super::column::ColumnDef;
use super::schema::{EntitySchema, OrderBy};

pub static PROJECT_DOCUMENTS: EntitySchema = EntitySchema {
    name: "project_documents",
    label: "Project document",
    columns: &[
        ColumnDef::uuid("project_id").required(),
        ColumnDef::text("name").required(),
        ColumnDef::text("type"),
        ColumnDef::text("file_url").required(),
        ColumnDef::numeric("size_kb"),
        ColumnDef::date("upload_date"),
        ColumnDef::uuid("uploaded_by"),
        ColumnDef::text("notes"),
    ],
    aliases: &[("doc_type", "type")],
    filters: &["project_id"],
    order: &[OrderBy::asc("name")],
    projection: None,
};

pub static DOCUMENT_VERSIONS: EntitySchema = EntitySchema {
    name: "document_versions",
    label: "Document version",
    columns: &[
        ColumnDef::uuid("document_id").required(),
        ColumnDef::integer("version_number").required(),
        ColumnDef::text("file_url").required(),
        ColumnDef::date("upload_date"),
        ColumnDef::uuid("uploaded_by"),
        ColumnDef::text("notes"),
    ],
    aliases: &[],
    filters: &["document_id"],
    order: &[OrderBy::desc("version_number")],
    projection: None,
};
