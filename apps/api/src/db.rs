use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Creates the connection pool used by the API server.
///
/// The store is opened read-only at the connection level. The dashboard
/// only reads, and caller-supplied SQL from the ad-hoc endpoint cannot
/// write or alter schema through these connections.
pub async fn create_read_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite store (read-only)...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .with_context(|| {
            format!("Failed to open '{database_url}' read-only; has `load` been run?")
        })?;

    info!("SQLite connection pool established (read-only)");
    Ok(pool)
}

/// Creates the read-write pool used by the CSV loader.
/// SQLite has a single writer, so one connection is all the loader gets.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite store (read-write)...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open '{database_url}' for writing"))?;

    info!("SQLite connection pool established (read-write)");
    Ok(pool)
}
