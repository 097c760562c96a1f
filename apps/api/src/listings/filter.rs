use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::listings::schema::{self, has_column};
use crate::models::listing::ListingRow;

/// Substring constraints over the listings table. Both are optional; active
/// ones compose with AND. Matching is case-insensitive for ASCII, which is
/// what SQLite's LIKE provides.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub location: Option<String>,
    pub keyword: Option<String>,
}

impl ListingFilter {
    /// Builds a filter from raw user input. Blank or whitespace-only
    /// fragments impose no constraint.
    pub fn from_params(location: Option<String>, keyword: Option<String>) -> Self {
        ListingFilter {
            location: clean_fragment(location),
            keyword: clean_fragment(keyword),
        }
    }
}

fn clean_fragment(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Escapes LIKE metacharacters in a fragment so it only ever matches
/// literally. Used together with `ESCAPE '\'`.
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// The filtered listing set every dashboard feature works from, plus the
/// store columns that were available and any degradation warnings.
#[derive(Debug, Clone)]
pub struct FilteredListings {
    pub listings: Vec<ListingRow>,
    pub columns: Vec<String>,
    pub warnings: Vec<String>,
}

/// Fetches the listings matching `filter`.
///
/// Fragments are never spliced into the SQL text; each active constraint
/// contributes a `LIKE ? ESCAPE '\'` with the pattern bound as a parameter.
/// A constraint whose column is missing from the store is skipped with a
/// warning instead of failing the request, and a missing table degrades to
/// an empty result the same way.
pub async fn fetch_filtered(
    pool: &SqlitePool,
    filter: &ListingFilter,
) -> Result<FilteredListings, AppError> {
    let columns = schema::table_columns(pool).await?;
    let mut warnings = Vec::new();

    if columns.is_empty() {
        warnings.push(format!(
            "Table '{}' not found; run the load command first.",
            schema::JOBS_TABLE
        ));
        return Ok(FilteredListings {
            listings: vec![],
            columns,
            warnings,
        });
    }

    let mut sql = schema::listing_select_sql(&columns);
    sql.push_str(" WHERE 1=1");
    let mut patterns: Vec<String> = Vec::new();

    if let Some(location) = &filter.location {
        if has_column(&columns, "location") {
            sql.push_str(r#" AND "location" LIKE ? ESCAPE '\'"#);
            patterns.push(format!("%{}%", escape_like(location)));
        } else {
            warnings.push("No 'location' column found; location filter ignored.".to_string());
        }
    }
    if let Some(keyword) = &filter.keyword {
        if has_column(&columns, "description") {
            sql.push_str(r#" AND "description" LIKE ? ESCAPE '\'"#);
            patterns.push(format!("%{}%", escape_like(keyword)));
        } else {
            warnings.push("No 'description' column found; keyword filter ignored.".to_string());
        }
    }

    let mut query = sqlx::query_as::<_, ListingRow>(&sql);
    for pattern in &patterns {
        query = query.bind(pattern.as_str());
    }
    let listings = query.fetch_all(pool).await?;

    Ok(FilteredListings {
        listings,
        columns,
        warnings,
    })
}
