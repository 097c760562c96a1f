use sqlx::{Row, SqlitePool};

/// The single table the loader writes and the dashboard reads.
pub const JOBS_TABLE: &str = "jobs";

/// Columns the dashboard knows how to interpret. The store may carry more
/// (whatever else the CSV had) or fewer; absent ones are selected as NULL.
pub const LISTING_COLUMNS: [&str; 4] = ["position_name", "company", "location", "description"];

/// Wraps an identifier in double quotes, doubling any embedded quote.
/// Values never go through here; they are always bound as parameters.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Returns the column names of the jobs table in schema order.
/// An empty result means the table does not exist yet.
pub async fn table_columns(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let sql = format!("PRAGMA table_info({})", quote_ident(JOBS_TABLE));
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    rows.iter()
        .map(|row| row.try_get::<String, _>("name"))
        .collect()
}

pub fn has_column(columns: &[String], name: &str) -> bool {
    columns.iter().any(|c| c == name)
}

/// Builds the SELECT list for `ListingRow`: columns present in the store are
/// selected directly, absent ones as `NULL AS name` so the row shape the
/// rest of the dashboard sees never changes.
pub fn listing_select_sql(columns: &[String]) -> String {
    let select_list = LISTING_COLUMNS
        .iter()
        .map(|&column| {
            if has_column(columns, column) {
                quote_ident(column)
            } else {
                format!("NULL AS {}", quote_ident(column))
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {select_list} FROM {}", quote_ident(JOBS_TABLE))
}
