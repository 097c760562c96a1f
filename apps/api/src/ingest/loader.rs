//! Destructive CSV load: drop and recreate the jobs table in one transaction.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::ingest::csv_source::CsvTable;
use crate::listings::schema::{quote_ident, JOBS_TABLE};

/// Outcome of a completed load.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub table: String,
    pub columns: usize,
    pub rows: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Replaces the jobs table with the contents of `table`.
///
/// Runs as a single transaction: DROP TABLE IF EXISTS, CREATE TABLE with
/// every column as TEXT, then one bound INSERT per row. Either the whole
/// file lands or the previous table survives untouched. Column names are
/// quoted identifiers; cell values only ever travel as bind parameters.
pub async fn replace_jobs_table(pool: &SqlitePool, table: &CsvTable) -> Result<LoadSummary> {
    if table.columns.is_empty() {
        bail!("Refusing to load a CSV with no columns");
    }

    let quoted: Vec<String> = table.columns.iter().map(|c| quote_ident(c)).collect();

    let create_sql = format!(
        "CREATE TABLE {} ({})",
        quote_ident(JOBS_TABLE),
        quoted
            .iter()
            .map(|c| format!("{c} TEXT"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let insert_sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(JOBS_TABLE),
        quoted.join(", "),
        vec!["?"; table.columns.len()].join(", ")
    );

    let mut tx = pool.begin().await?;

    sqlx::query(&format!("DROP TABLE IF EXISTS {}", quote_ident(JOBS_TABLE)))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&create_sql).execute(&mut *tx).await?;

    for row in &table.rows {
        if row.len() != table.columns.len() {
            bail!(
                "Row has {} cells but the header has {} columns",
                row.len(),
                table.columns.len()
            );
        }
        let mut insert = sqlx::query(&insert_sql);
        for cell in row {
            insert = insert.bind(cell.as_deref());
        }
        insert.execute(&mut *tx).await?;
    }

    tx.commit().await?;

    info!(
        "Replaced table '{}': {} columns, {} rows",
        JOBS_TABLE,
        table.columns.len(),
        table.rows.len()
    );

    Ok(LoadSummary {
        table: JOBS_TABLE.to_string(),
        columns: table.columns.len(),
        rows: table.rows.len(),
        loaded_at: Utc::now(),
    })
}
