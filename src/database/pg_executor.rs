//! # PostgreSQL Executor
//!
//! [`QueryExecutor`] over a `sqlx` connection pool. Parameters are bound in statement
//! order; rows are streamed and converted into positional [`Row`]s by column type.
//!
//! A connection is borrowed from the pool for one statement only. The row stream is
//! owned by the executing future, so it is closed on success, on the first decode
//! error, and when the execution context cancels the call.

use super::executor::{ExecutionContext, QueryExecutor};
use super::row::Row;
use crate::error::{Result, SearchError};
use crate::query_builder::{SqlValue, Statement};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use futures::TryStreamExt;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo};
use tracing::debug;

#[derive(Clone)]
pub struct PgQueryExecutor {
    pool: PgPool,
}

impl PgQueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QueryExecutor for PgQueryExecutor {
    async fn fetch_all(&self, ctx: &ExecutionContext, statement: &Statement) -> Result<Vec<Row>> {
        debug!(sql = %statement.sql, params = statement.params.len(), "fetch_all");
        ctx.run("fetch_all", async {
            let mut cursor =
                bind_params(sqlx::query(&statement.sql), &statement.params).fetch(&self.pool);
            let mut rows = Vec::new();
            while let Some(pg_row) = cursor.try_next().await? {
                rows.push(convert_row(&pg_row)?);
            }
            Ok(rows)
        })
        .await
    }

    async fn fetch_optional(
        &self,
        ctx: &ExecutionContext,
        statement: &Statement,
    ) -> Result<Option<Row>> {
        debug!(sql = %statement.sql, params = statement.params.len(), "fetch_optional");
        ctx.run("fetch_optional", async {
            let pg_row = bind_params(sqlx::query(&statement.sql), &statement.params)
                .fetch_optional(&self.pool)
                .await?;
            pg_row.as_ref().map(convert_row).transpose()
        })
        .await
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(Option::<String>::None),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::Float(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
            SqlValue::Timestamp(v) => query.bind(*v),
        };
    }
    query
}

fn convert_row(row: &PgRow) -> Result<Row> {
    let values = row
        .columns()
        .iter()
        .map(|column| decode_column(row, column.ordinal(), column.type_info().name()))
        .collect::<Result<Vec<_>>>()?;
    Ok(Row::new(values))
}

fn decode_column(row: &PgRow, index: usize, type_name: &str) -> Result<SqlValue> {
    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(SqlValue::Bool),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)?
            .map(|v| SqlValue::Int(i64::from(v))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)?
            .map(|v| SqlValue::Int(i64::from(v))),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(SqlValue::Int),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .map(|v| SqlValue::Float(f64::from(v))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(SqlValue::Float),
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(index)?.map(SqlValue::Text)
        }
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(SqlValue::Timestamp),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|v| SqlValue::Timestamp(v.and_utc())),
        other => {
            return Err(SearchError::mapping(format!(
                "column {index}: unsupported column type {other}"
            )))
        }
    };

    Ok(value.unwrap_or(SqlValue::Null))
}
