//! Connection pool seam
//!
//! The table access layer only ever hands a finished statement string to a
//! [`QueryExecutor`]. [`ConnectionPool`] is the sqlx-backed implementation;
//! tests substitute their own executors.
//!
//! Literals are already inlined, so statements go over the text protocol
//! (`sqlx::raw_sql`) and never touch the prepared statement cache.

use crate::errors::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

/// One result row keyed by column label
pub type Row = Map<String, Value>;

/// Outcome of an INSERT / UPDATE / DELETE
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteResult {
    pub insert_id: u64,
    pub affected_rows: u64,
}

/// Executes finished statement text
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run a statement that returns rows
    async fn query(&self, sql: &str) -> Result<Vec<Row>, StoreError>;

    /// Run a statement that modifies rows
    async fn query_write(&self, sql: &str) -> Result<WriteResult, StoreError>;
}

/// Shared MySQL pool
#[derive(Clone, Debug)]
pub struct ConnectionPool {
    pool: MySqlPool,
}

impl ConnectionPool {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Wait for checked-out connections to return, then close them all
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[async_trait]
impl QueryExecutor for ConnectionPool {
    async fn query(&self, sql: &str) -> Result<Vec<Row>, StoreError> {
        crate::trace_log!("Executing read statement: {}", sql);

        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!(severity = "critical", statement = sql, error = %e, "Query execution failed");
            StoreError::execution(sql, e)
        })?;

        rows.iter().map(|row| decode_row(row, sql)).collect()
    }

    async fn query_write(&self, sql: &str) -> Result<WriteResult, StoreError> {
        crate::trace_log!("Executing write statement: {}", sql);

        let result = sqlx::raw_sql(sql).execute(&self.pool).await.map_err(|e| {
            tracing::error!(severity = "critical", statement = sql, error = %e, "Query execution failed");
            StoreError::execution(sql, e)
        })?;

        Ok(WriteResult {
            insert_id: result.last_insert_id(),
            affected_rows: result.rows_affected(),
        })
    }
}

/// Convert a driver row into a JSON object keyed by column label
fn decode_row(row: &MySqlRow, sql: &str) -> Result<Row, StoreError> {
    let mut object = Map::with_capacity(row.columns().len());
    for (index, column) in row.columns().iter().enumerate() {
        let value = decode_column(row, index, column.type_info().name())
            .map_err(|e| StoreError::decode(sql, format!("column `{}`: {}", column.name(), e)))?;
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}

fn decode_column(row: &MySqlRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOLEAN" => Value::Bool(row.try_get_unchecked::<bool, _>(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            Value::from(row.try_get_unchecked::<i64, _>(index)?)
        }
        name if name.ends_with(" UNSIGNED") => {
            Value::from(row.try_get_unchecked::<u64, _>(index)?)
        }
        "FLOAT" => float_value(f64::from(row.try_get_unchecked::<f32, _>(index)?)),
        "DOUBLE" => float_value(row.try_get_unchecked::<f64, _>(index)?),
        "DATETIME" | "TIMESTAMP" => Value::String(
            row.try_get_unchecked::<chrono::NaiveDateTime, _>(index)?
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ),
        "DATE" => Value::String(
            row.try_get_unchecked::<chrono::NaiveDate, _>(index)?
                .format("%Y-%m-%d")
                .to_string(),
        ),
        "JSON" => row.try_get_unchecked::<Value, _>(index)?,
        // Text, DECIMAL, TIME, blobs: keep the wire text
        _ => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
    };
    Ok(value)
}

fn float_value(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}
