use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::EntitySchema;
use crate::database::query_builder::{bind_param_scalar, build_update, QueryBuilder, SqlResult};
use crate::database::record::{parse_filters, Record};
use crate::types::Operation;

/// CRUD over one entity table, driven entirely by its schema descriptor.
///
/// Input is validated into a `Record` before a connection is acquired, so
/// malformed requests never reach the database. Writes run in their own
/// transaction; an error drops it uncommitted.
#[derive(Clone)]
pub struct Repository {
    entity: &'static EntitySchema,
    pool: PgPool,
}

impl Repository {
    pub fn new(entity: &'static EntitySchema, pool: PgPool) -> Self {
        Self { entity, pool }
    }

    fn builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.entity)
    }

    pub async fn create(&self, input: Value) -> Result<Uuid, DatabaseError> {
        let record = Record::for_create(self.entity, input)?;
        let sql = self.builder().insert(&record);
        let id = self.write(Operation::Create, sql).await?;
        info!(entity = self.entity.name, %id, "Record created");
        Ok(id)
    }

    pub async fn list(&self, params: &HashMap<String, String>) -> Result<Vec<Value>, DatabaseError> {
        let filters = parse_filters(self.entity, params)?;
        let sql = self.builder().select(&filters);

        let mut q = sqlx::query_scalar::<_, Value>(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_scalar(q, p);
        }
        q.fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::classify(e, Operation::Select, self.entity.label))
    }

    /// Fetch one record, or `NotFound`.
    pub async fn select_404(&self, id: Uuid) -> Result<Value, DatabaseError> {
        let sql = self.builder().select_by_id(id);

        let mut q = sqlx::query_scalar::<_, Value>(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_scalar(q, p);
        }
        q.fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::classify(e, Operation::Select, self.entity.label))
    }

    pub async fn update(&self, id: Uuid, changes: Value) -> Result<Uuid, DatabaseError> {
        let sql = build_update(self.entity, id, changes)?;
        // Every bound value but the trailing id is a changed column
        let fields = sql.params.len() - 1;
        let id = self.write(Operation::Update, sql).await?;
        info!(entity = self.entity.name, %id, fields, "Record updated");
        Ok(id)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Uuid, DatabaseError> {
        let sql = self.builder().delete(id);
        let id = self.write(Operation::Delete, sql).await?;
        info!(entity = self.entity.name, %id, "Record deleted");
        Ok(id)
    }

    /// Run one `... RETURNING id` statement inside a transaction.
    async fn write(&self, operation: Operation, sql: SqlResult) -> Result<Uuid, DatabaseError> {
        debug!(
            entity = self.entity.name,
            operation = operation.as_str(),
            query = %sql.query,
            "Executing write"
        );

        let classify = |e| DatabaseError::classify(e, operation, self.entity.label);
        let mut tx = self.pool.begin().await?;

        let mut q = sqlx::query_scalar::<_, Uuid>(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_scalar(q, p);
        }
        let id = q.fetch_one(&mut *tx).await.map_err(classify)?;

        tx.commit().await.map_err(classify)?;
        Ok(id)
    }
}
