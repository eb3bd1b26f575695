use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{postgres::PgArguments, query::QueryScalar, Postgres};
use uuid::Uuid;

use crate::database::models::{ColumnType, EntitySchema};
use crate::database::record::{Record, RecordError, SqlValue};

/// Statement text plus the values for its numbered placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}

/// Builds every statement the generic repository runs for one entity.
///
/// Identifiers in the emitted SQL come exclusively from the entity
/// descriptor; caller input only ever reaches the statement as bound
/// parameters.
pub struct QueryBuilder {
    entity: &'static EntitySchema,
}

impl QueryBuilder {
    pub fn new(entity: &'static EntitySchema) -> Self {
        Self { entity }
    }

    pub fn insert(&self, record: &Record) -> SqlResult {
        let table = self.entity.table();
        if record.is_empty() {
            return SqlResult {
                query: format!("INSERT INTO \"{table}\" DEFAULT VALUES RETURNING id"),
                params: vec![],
            };
        }

        let mut columns = Vec::with_capacity(record.fields().len());
        let mut placeholders = Vec::with_capacity(record.fields().len());
        let mut params = Vec::with_capacity(record.fields().len());
        for (i, (col, value)) in record.fields().iter().enumerate() {
            columns.push(format!("\"{}\"", col.name));
            placeholders.push(format!("${}::{}", i + 1, col.column_type.pg_cast()));
            params.push(value.clone());
        }

        SqlResult {
            query: format!(
                "INSERT INTO \"{table}\" ({}) VALUES ({}) RETURNING id",
                columns.join(", "),
                placeholders.join(", ")
            ),
            params,
        }
    }

    /// `UPDATE <table> SET ... WHERE id = $n RETURNING id`
    pub fn update(&self, id: Uuid, record: &Record) -> Result<SqlResult, RecordError> {
        if record.is_empty() {
            return Err(RecordError::EmptyUpdate);
        }

        let mut assignments = Vec::with_capacity(record.fields().len());
        let mut params = Vec::with_capacity(record.fields().len() + 1);
        for (i, (col, value)) in record.fields().iter().enumerate() {
            assignments.push(format!(
                "\"{}\" = ${}::{}",
                col.name,
                i + 1,
                col.column_type.pg_cast()
            ));
            params.push(value.clone());
        }
        params.push(SqlValue::Uuid(id));

        Ok(SqlResult {
            query: format!(
                "UPDATE \"{}\" SET {} WHERE id = ${}::uuid RETURNING id",
                self.entity.table(),
                assignments.join(", "),
                params.len()
            ),
            params,
        })
    }

    pub fn delete(&self, id: Uuid) -> SqlResult {
        SqlResult {
            query: format!(
                "DELETE FROM \"{}\" WHERE id = $1::uuid RETURNING id",
                self.entity.table()
            ),
            params: vec![SqlValue::Uuid(id)],
        }
    }

    /// List rows as JSON objects, restricted by foreign-key equality filters.
    pub fn select(&self, filters: &[(&'static str, Uuid)]) -> SqlResult {
        let mut conditions = Vec::with_capacity(filters.len());
        let mut params = Vec::with_capacity(filters.len());
        for (i, (column, value)) in filters.iter().enumerate() {
            conditions.push(format!("t.\"{}\" = ${}::uuid", column, i + 1));
            params.push(SqlValue::Uuid(*value));
        }
        SqlResult {
            query: self.select_sql(&conditions),
            params,
        }
    }

    pub fn select_by_id(&self, id: Uuid) -> SqlResult {
        SqlResult {
            query: self.select_sql(&["t.id = $1::uuid".to_string()]),
            params: vec![SqlValue::Uuid(id)],
        }
    }

    fn select_sql(&self, conditions: &[String]) -> String {
        let mut inner = String::from("SELECT t.*");
        if let Some(projection) = &self.entity.projection {
            inner.push_str(", ");
            inner.push_str(projection.select);
        }
        inner.push_str(&format!(" FROM \"{}\" t", self.entity.table()));
        if let Some(projection) = &self.entity.projection {
            inner.push(' ');
            inner.push_str(projection.join);
        }
        if !conditions.is_empty() {
            inner.push_str(" WHERE ");
            inner.push_str(&conditions.join(" AND "));
        }

        let order = self
            .entity
            .order
            .iter()
            .map(|o| format!("r.\"{}\" {}", o.column, o.sort.to_sql()))
            .chain(std::iter::once("r.\"id\" ASC".to_string()))
            .collect::<Vec<_>>()
            .join(", ");

        format!("SELECT row_to_json(r) AS row FROM ({inner}) r ORDER BY {order}")
    }
}

/// Partial update entry point: allow-list and type the mapping, then build
/// the statement.
pub fn build_update(
    entity: &'static EntitySchema,
    id: Uuid,
    changes: Value,
) -> Result<SqlResult, RecordError> {
    let record = Record::for_update(entity, changes)?;
    QueryBuilder::new(entity).update(id, &record)
}

pub fn bind_param_scalar<'q, O>(
    q: QueryScalar<'q, Postgres, O, PgArguments>,
    v: &SqlValue,
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    match v {
        SqlValue::Null(ColumnType::Text) => q.bind(None::<String>),
        SqlValue::Null(ColumnType::Uuid) => q.bind(None::<Uuid>),
        SqlValue::Null(ColumnType::Date) => q.bind(None::<NaiveDate>),
        SqlValue::Null(ColumnType::Numeric) => q.bind(None::<Decimal>),
        SqlValue::Null(ColumnType::Integer) => q.bind(None::<i32>),
        SqlValue::Text(s) => q.bind(s.clone()),
        SqlValue::Uuid(u) => q.bind(*u),
        SqlValue::Date(d) => q.bind(*d),
        SqlValue::Numeric(n) => q.bind(*n),
        SqlValue::Integer(i) => q.bind(*i),
    }
}
