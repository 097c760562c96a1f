use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};

use crate::errors::AppError;

/// Tabular result of an ad-hoc query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
}

/// Runs caller-supplied SQL against the store.
///
/// The statement executes as-is on the read-only pool; the engine itself
/// rejects writes and schema changes. Driver errors (bad syntax, unknown
/// table, write attempt) come back as `AppError::Query` with the driver
/// message intact.
pub async fn run_query(pool: &SqlitePool, sql: &str) -> Result<QueryOutput, AppError> {
    let sql = sql.trim();
    if sql.is_empty() {
        return Err(AppError::Validation("Query must not be empty".to_string()));
    }

    let fetched = sqlx::query(sql)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Query(e.to_string()))?;

    let columns: Vec<String> = match fetched.first() {
        Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::with_capacity(fetched.len());
    for row in &fetched {
        let mut values = Vec::with_capacity(row.columns().len());
        for index in 0..row.columns().len() {
            let value = column_value(row, index).map_err(|e| AppError::Query(e.to_string()))?;
            values.push(value);
        }
        rows.push(values);
    }

    let row_count = rows.len();
    Ok(QueryOutput {
        columns,
        rows,
        row_count,
    })
}

/// Decodes one cell into JSON based on its SQLite storage class.
fn column_value(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let type_name = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };

    match type_name.as_str() {
        "INTEGER" => Ok(json!(row.try_get::<i64, _>(index)?)),
        "REAL" => Ok(json!(row.try_get::<f64, _>(index)?)),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(index)?;
            Ok(json!(format!("<{} byte blob>", bytes.len())))
        }
        _ => Ok(json!(row.try_get::<String, _>(index)?)),
    }
}
