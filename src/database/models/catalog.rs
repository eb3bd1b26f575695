//! Reference tables: suppliers, cost categories and units of measure.

use super::column::ColumnDef;
use super::schema::{EntitySchema, OrderBy};

pub static SUPPLIERS: EntitySchema = EntitySchema {
    name: "suppliers",
    label: "Supplier",
    columns: &[
        ColumnDef::text("name").required(),
        ColumnDef::text("cnpj_cpf"),
        ColumnDef::text("contact").required(),
        ColumnDef::text("address"),
        ColumnDef::text("notes"),
        ColumnDef::text("delivery_time"),
        ColumnDef::text("payment_terms"),
    ],
    aliases: &[],
    filters: &[],
    order: &[OrderBy::asc("name")],
    projection: None,
};

pub static COST_CATEGORIES: EntitySchema = EntitySchema {
    name: "cost_categories",
    label: "Cost category",
    columns: &[
        ColumnDef::text("name").required(),
        ColumnDef::text("description"),
    ],
    aliases: &[],
    filters: &[],
    order: &[OrderBy::asc("name")],
    projection: None,
};

pub static UNITS_OF_MEASURE: EntitySchema = EntitySchema {
    name: "units_of_measure",
    label: "Unit of measure",
    columns: &[ColumnDef::text("name").required()],
    aliases: &[],
    filters: &[],
    order: &[OrderBy::asc("name")],
    projection: None,
};
