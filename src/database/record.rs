use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::database::models::{ColumnDef, ColumnType, DefaultValue, EntitySchema};

/// Fields assigned by the store, never accepted from API input
const SYSTEM_FIELDS: &[&str] = &["id", "created_at"];

/// Errors raised while turning API input into column values.
/// All of them surface as 400 responses.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("System field '{0}' cannot be set via API input")]
    SystemFieldNotAllowed(&'static str),
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },
    #[error("Field '{0}' was given more than once")]
    DuplicateField(&'static str),
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),
    #[error("Field '{0}' cannot be empty")]
    EmptyRequiredField(&'static str),
    #[error("No fields provided for update")]
    EmptyUpdate,
    #[error("Invalid UUID format for field '{field}': {value}")]
    InvalidUuid { field: String, value: String },
    #[error("Invalid date for field '{field}' (expected YYYY-MM-DD): {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("Invalid number for field '{field}': {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Field '{0}' must be a string")]
    InvalidText(&'static str),
}

impl RecordError {
    /// Name of the offending field, if the error is about a single one.
    pub fn field(&self) -> Option<&str> {
        match self {
            RecordError::SystemFieldNotAllowed(f)
            | RecordError::DuplicateField(f)
            | RecordError::EmptyRequiredField(f)
            | RecordError::InvalidText(f) => Some(*f),
            RecordError::InvalidDate { field, .. } | RecordError::InvalidNumber { field, .. } => {
                Some(*field)
            }
            RecordError::UnknownField { field, .. } | RecordError::InvalidUuid { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }
}

/// A typed value ready to be bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Typed so a cached statement keeps the column's parameter type
    Null(ColumnType),
    Text(String),
    Uuid(Uuid),
    Date(NaiveDate),
    Numeric(Decimal),
    Integer(i32),
}

impl SqlValue {
    /// Convert one JSON value according to the column it targets.
    pub fn from_json(column: &ColumnDef, value: &Value) -> Result<Self, RecordError> {
        if value.is_null() {
            return Ok(SqlValue::Null(column.column_type));
        }
        // Form clients send "" for untouched optional inputs
        if column.column_type != ColumnType::Text && is_blank(value) {
            return Ok(SqlValue::Null(column.column_type));
        }

        match column.column_type {
            ColumnType::Text => match value {
                Value::String(s) => Ok(SqlValue::Text(s.clone())),
                Value::Number(n) => Ok(SqlValue::Text(n.to_string())),
                Value::Bool(b) => Ok(SqlValue::Text(b.to_string())),
                _ => Err(RecordError::InvalidText(column.name)),
            },
            ColumnType::Uuid => {
                let raw = scalar_text(value);
                parse_uuid(column.name, &raw).map(SqlValue::Uuid)
            }
            ColumnType::Date => {
                let raw = scalar_text(value);
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map(SqlValue::Date)
                    .map_err(|_| RecordError::InvalidDate {
                        field: column.name,
                        value: raw,
                    })
            }
            ColumnType::Numeric => {
                let raw = scalar_text(value);
                parse_decimal(raw.trim())
                    .map(SqlValue::Numeric)
                    .ok_or(RecordError::InvalidNumber {
                        field: column.name,
                        value: raw,
                    })
            }
            ColumnType::Integer => {
                let raw = scalar_text(value);
                raw.trim()
                    .parse::<i32>()
                    .map(SqlValue::Integer)
                    .map_err(|_| RecordError::InvalidNumber {
                        field: column.name,
                        value: raw,
                    })
            }
        }
    }

    fn from_default(default: DefaultValue) -> Self {
        match default {
            DefaultValue::Text(s) => SqlValue::Text(s.to_string()),
            DefaultValue::Numeric(n) => SqlValue::Numeric(Decimal::from(n)),
        }
    }
}

/// Allow-listed, typed column values for one write.
///
/// Fields are kept in the descriptor's declaration order so the generated
/// statement text does not depend on the order keys arrived in.
#[derive(Debug, Clone)]
pub struct Record {
    entity: &'static EntitySchema,
    fields: Vec<(&'static ColumnDef, SqlValue)>,
}

impl Record {
    /// Validate input for an insert.
    ///
    /// Every required column must be present with a non-blank value; optional
    /// columns with a default receive it when absent or null.
    pub fn for_create(entity: &'static EntitySchema, json: Value) -> Result<Self, RecordError> {
        let mut record = Self::from_json(entity, json)?;

        let missing: Vec<&'static str> = entity
            .required_columns()
            .filter(|col| match record.get(col.name) {
                None | Some(SqlValue::Null(_)) => true,
                Some(SqlValue::Text(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(|col| col.name)
            .collect();
        if !missing.is_empty() {
            return Err(RecordError::MissingRequiredFields(missing));
        }

        for col in entity.columns {
            let Some(default) = col.default else { continue };
            match record.fields.iter().position(|(c, _)| c.name == col.name) {
                Some(i) if matches!(record.fields[i].1, SqlValue::Null(_)) => {
                    record.fields[i].1 = SqlValue::from_default(default);
                }
                Some(_) => {}
                None => record.fields.push((col, SqlValue::from_default(default))),
            }
        }
        record.sort();

        Ok(record)
    }

    /// Validate input for a partial update.
    ///
    /// The mapping must be non-empty, and required columns may be changed but
    /// never cleared.
    pub fn for_update(entity: &'static EntitySchema, json: Value) -> Result<Self, RecordError> {
        let record = Self::from_json(entity, json)?;
        if record.fields.is_empty() {
            return Err(RecordError::EmptyUpdate);
        }

        for (col, value) in &record.fields {
            if !col.required {
                continue;
            }
            let blank = match value {
                SqlValue::Null(_) => true,
                SqlValue::Text(s) => s.trim().is_empty(),
                _ => false,
            };
            if blank {
                return Err(RecordError::EmptyRequiredField(col.name));
            }
        }

        Ok(record)
    }

    fn from_json(entity: &'static EntitySchema, json: Value) -> Result<Self, RecordError> {
        let map = match json {
            Value::Object(map) => map,
            _ => return Err(RecordError::InvalidJson("Expected JSON object".to_string())),
        };

        let mut record = Self {
            entity,
            fields: Vec::with_capacity(map.len()),
        };
        record.assign(map)?;
        record.sort();
        Ok(record)
    }

    fn assign(&mut self, map: Map<String, Value>) -> Result<(), RecordError> {
        for (key, value) in map {
            if let Some(system) = SYSTEM_FIELDS.iter().find(|&&f| f == key) {
                return Err(RecordError::SystemFieldNotAllowed(*system));
            }
            let column = self
                .entity
                .column(&key)
                .ok_or_else(|| RecordError::UnknownField {
                    entity: self.entity.name,
                    field: key.clone(),
                })?;
            // `doc_type` and `type` together name the same column
            if self.get(column.name).is_some() {
                return Err(RecordError::DuplicateField(column.name));
            }
            let value = SqlValue::from_json(column, &value)?;
            self.fields.push((column, value));
        }
        Ok(())
    }

    fn sort(&mut self) {
        let entity = self.entity;
        self.fields.sort_by_key(|(col, _)| entity.position(col));
    }

    pub fn fields(&self) -> &[(&'static ColumnDef, SqlValue)] {
        &self.fields
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(c, _)| c.name == column)
            .map(|(_, v)| v)
    }

    pub fn get_uuid(&self, column: &str) -> Option<Uuid> {
        match self.get(column) {
            Some(SqlValue::Uuid(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Pick the entity's declared foreign-key filters out of query parameters.
/// Parameters the entity does not declare are ignored.
pub fn parse_filters(
    entity: &EntitySchema,
    params: &HashMap<String, String>,
) -> Result<Vec<(&'static str, Uuid)>, RecordError> {
    let mut filters: Vec<(&'static str, Uuid)> = Vec::new();
    for column in entity.filters {
        if let Some(raw) = params.get(*column) {
            filters.push((*column, parse_uuid(column, raw)?));
        }
    }
    Ok(filters)
}

pub fn parse_uuid(field: &str, raw: &str) -> Result<Uuid, RecordError> {
    Uuid::parse_str(raw.trim()).map_err(|_| RecordError::InvalidUuid {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::document::PROJECT_DOCUMENTS;
    use crate::database::models::project::{PROJECTS, PROJECT_SERVICES};
    use serde_json::json;

    fn project_input() -> Value {
        json!({
            "name": "Residencial Alfa",
            "client_id": "6f1c2a3e-0d4b-4b8e-9b7a-1c2d3e4f5a6b",
            "address": "Rua das Flores, 10",
            "start_date": "2024-01-15",
            "end_date": "2024-12-20",
            "budget": 100000
        })
    }

    #[test]
    fn create_applies_default_status() {
        let record = Record::for_create(&PROJECTS, project_input()).unwrap();
        assert_eq!(
            record.get("status"),
            Some(&SqlValue::Text("Planning".to_string()))
        );
        assert_eq!(
            record.get("budget"),
            Some(&SqlValue::Numeric(Decimal::from(100000)))
        );
    }

    #[test]
    fn create_keeps_explicit_status() {
        let mut input = project_input();
        input["status"] = json!("In Progress");
        let record = Record::for_create(&PROJECTS, input).unwrap();
        assert_eq!(
            record.get("status"),
            Some(&SqlValue::Text("In Progress".to_string()))
        );
    }

    #[test]
    fn create_reports_every_missing_required_field() {
        let err = Record::for_create(&PROJECTS, json!({ "name": "Only a name" })).unwrap_err();
        match err {
            RecordError::MissingRequiredFields(fields) => {
                assert_eq!(
                    fields,
                    vec!["client_id", "address", "start_date", "end_date", "budget"]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn create_treats_empty_string_as_missing() {
        let mut input = project_input();
        input["name"] = json!("   ");
        let err = Record::for_create(&PROJECTS, input).unwrap_err();
        assert!(matches!(err, RecordError::MissingRequiredFields(f) if f == vec!["name"]));
    }

    #[test]
    fn create_rejects_client_supplied_id() {
        let mut input = project_input();
        input["id"] = json!("6f1c2a3e-0d4b-4b8e-9b7a-1c2d3e4f5a6b");
        let err = Record::for_create(&PROJECTS, input).unwrap_err();
        assert!(matches!(err, RecordError::SystemFieldNotAllowed("id")));
    }

    #[test]
    fn update_rejects_empty_mapping() {
        let err = Record::for_update(&PROJECTS, json!({})).unwrap_err();
        assert!(matches!(err, RecordError::EmptyUpdate));
    }

    #[test]
    fn update_rejects_unknown_field() {
        let err = Record::for_update(&PROJECTS, json!({ "owner": "x" })).unwrap_err();
        assert!(matches!(err, RecordError::UnknownField { field, .. } if field == "owner"));
    }

    #[test]
    fn update_rejects_clearing_required_field() {
        let err = Record::for_update(&PROJECTS, json!({ "name": null })).unwrap_err();
        assert!(matches!(err, RecordError::EmptyRequiredField("name")));
    }

    #[test]
    fn update_allows_clearing_optional_field() {
        let record = Record::for_update(&PROJECT_SERVICES, json!({ "measure": null })).unwrap();
        assert_eq!(record.get("measure"), Some(&SqlValue::Null(ColumnType::Numeric)));
    }

    #[test]
    fn nulls_carry_their_column_type() {
        let record = Record::for_create(
            &PROJECT_DOCUMENTS,
            json!({
                "project_id": "6f1c2a3e-0d4b-4b8e-9b7a-1c2d3e4f5a6b",
                "name": "Memorial",
                "file_url": "https://files.obra.test/memorial.pdf",
                "uploaded_by": null,
                "upload_date": "",
                "size_kb": null
            }),
        )
        .unwrap();
        assert_eq!(record.get("uploaded_by"), Some(&SqlValue::Null(ColumnType::Uuid)));
        assert_eq!(record.get("upload_date"), Some(&SqlValue::Null(ColumnType::Date)));
        assert_eq!(record.get("size_kb"), Some(&SqlValue::Null(ColumnType::Numeric)));
    }

    #[test]
    fn alias_maps_to_internal_column() {
        let record = Record::for_update(&PROJECT_DOCUMENTS, json!({ "doc_type": "Plan" })).unwrap();
        assert_eq!(record.get("type"), Some(&SqlValue::Text("Plan".to_string())));
    }

    #[test]
    fn alias_and_internal_name_together_are_rejected() {
        let err = Record::for_update(
            &PROJECT_DOCUMENTS,
            json!({ "doc_type": "Plan", "type": "Contract" }),
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::DuplicateField("type")));
    }

    #[test]
    fn typed_values_are_validated() {
        let bad_date = Record::for_update(&PROJECTS, json!({ "start_date": "15/01/2024" }));
        assert!(matches!(bad_date, Err(RecordError::InvalidDate { .. })));

        let bad_uuid = Record::for_update(&PROJECTS, json!({ "client_id": "abc" }));
        assert!(matches!(bad_uuid, Err(RecordError::InvalidUuid { .. })));

        let bad_number = Record::for_update(&PROJECTS, json!({ "budget": "lots" }));
        assert!(matches!(bad_number, Err(RecordError::InvalidNumber { .. })));

        let numeric_string = Record::for_update(&PROJECTS, json!({ "budget": "1250.50" })).unwrap();
        assert_eq!(
            numeric_string.get("budget"),
            Some(&SqlValue::Numeric(Decimal::new(125050, 2)))
        );
    }

    #[test]
    fn fields_follow_declaration_order() {
        let record = Record::for_update(
            &PROJECTS,
            json!({ "budget": 1, "name": "B", "address": "C" }),
        )
        .unwrap();
        let names: Vec<&str> = record.fields().iter().map(|(c, _)| c.name).collect();
        assert_eq!(names, vec!["name", "address", "budget"]);
    }

    #[test]
    fn non_object_input_is_invalid_json() {
        let err = Record::for_create(&PROJECTS, json!(["name"])).unwrap_err();
        assert!(matches!(err, RecordError::InvalidJson(_)));
    }

    #[test]
    fn filters_ignore_undeclared_params() {
        let mut params = HashMap::new();
        params.insert(
            "client_id".to_string(),
            "6f1c2a3e-0d4b-4b8e-9b7a-1c2d3e4f5a6b".to_string(),
        );
        params.insert("page".to_string(), "2".to_string());
        let filters = parse_filters(&PROJECTS, &params).unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].0, "client_id");

        params.insert("client_id".to_string(), "nope".to_string());
        assert!(parse_filters(&PROJECTS, &params).is_err());
    }
}
