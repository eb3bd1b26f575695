use super::column::ColumnDef;
use super::schema::{EntitySchema, OrderBy};

pub static CLIENTS: EntitySchema = EntitySchema {
    name: "clients",
    label: "Client",
    columns: &[
        ColumnDef::text("name").required(),
        ColumnDef::text("contact"),
        ColumnDef::text("cnpj"),
        ColumnDef::text("address"),
        ColumnDef::text("notes"),
    ],
    aliases: &[],
    filters: &[],
    order: &[OrderBy::asc("name")],
    projection: None,
};
