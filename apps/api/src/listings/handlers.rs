use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::listings::adhoc::run_query;
use crate::listings::filter::{fetch_filtered, ListingFilter};
use crate::models::listing::ListingRow;
use crate::state::AppState;

/// Shown whenever a filtered view comes back empty: success with zero rows,
/// as opposed to a failure.
pub const EMPTY_RESULT_MESSAGE: &str = "No jobs found with the selected filters.";

/// Raw filter query parameters, shared by every filtered endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub location: Option<String>,
    pub keyword: Option<String>,
}

impl FilterParams {
    pub fn into_filter(self) -> ListingFilter {
        ListingFilter::from_params(self.location, self.keyword)
    }
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub total: usize,
    pub listings: Vec<ListingRow>,
    pub message: Option<String>,
    pub warnings: Vec<String>,
}

/// GET /api/v1/listings
pub async fn handle_get_listings(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ListingsResponse>, AppError> {
    let filtered = fetch_filtered(&state.db, &params.into_filter()).await?;
    let total = filtered.listings.len();
    let message = if total == 0 {
        Some(EMPTY_RESULT_MESSAGE.to_string())
    } else {
        None
    };
    Ok(Json(ListingsResponse {
        total,
        listings: filtered.listings,
        message,
        warnings: filtered.warnings,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AdhocQueryRequest {
    pub sql: String,
}

#[derive(Debug, Serialize)]
pub struct AdhocQueryResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
    pub message: Option<String>,
}

/// POST /api/v1/query
pub async fn handle_run_query(
    State(state): State<AppState>,
    Json(req): Json<AdhocQueryRequest>,
) -> Result<Json<AdhocQueryResponse>, AppError> {
    let output = run_query(&state.db, &req.sql).await?;
    let message = if output.row_count == 0 {
        Some("Query returned no rows.".to_string())
    } else {
        None
    };
    Ok(Json(AdhocQueryResponse {
        columns: output.columns,
        rows: output.rows,
        row_count: output.row_count,
        message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::csv_source::CsvTable;
    use crate::ingest::loader::replace_jobs_table;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn memory_state() -> AppState {
        let pool: SqlitePool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        AppState { db: pool }
    }

    async fn seeded_state() -> AppState {
        let state = memory_state().await;
        let table = CsvTable {
            columns: vec![
                "position_name".to_string(),
                "company".to_string(),
                "location".to_string(),
                "description".to_string(),
            ],
            rows: vec![
                vec![
                    Some("Data Analyst".to_string()),
                    Some("Acme".to_string()),
                    Some("Berlin".to_string()),
                    Some("Python and SQL daily".to_string()),
                ],
                vec![
                    Some("BI Developer".to_string()),
                    Some("Globex".to_string()),
                    Some("Hamburg".to_string()),
                    Some("Tableau plus Power BI".to_string()),
                ],
            ],
        };
        replace_jobs_table(&state.db, &table).await.unwrap();
        state
    }

    fn params(location: Option<&str>, keyword: Option<&str>) -> FilterParams {
        FilterParams {
            location: location.map(str::to_string),
            keyword: keyword.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_get_listings_returns_filtered_rows() {
        let state = seeded_state().await;
        let Json(response) =
            handle_get_listings(State(state), Query(params(Some("Berlin"), None)))
                .await
                .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.listings[0].company.as_deref(), Some("Acme"));
        assert_eq!(response.message, None);
    }

    #[tokio::test]
    async fn test_get_listings_empty_result_has_message() {
        let state = seeded_state().await;
        let Json(response) = handle_get_listings(State(state), Query(params(Some("Mars"), None)))
            .await
            .unwrap();
        assert_eq!(response.total, 0);
        assert_eq!(response.message.as_deref(), Some(EMPTY_RESULT_MESSAGE));
    }

    #[tokio::test]
    async fn test_run_query_round_trip() {
        let state = seeded_state().await;
        let Json(response) = handle_run_query(
            State(state),
            Json(AdhocQueryRequest {
                sql: "SELECT company FROM jobs ORDER BY company".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.columns, vec!["company"]);
        assert_eq!(response.row_count, 2);
        assert_eq!(response.message, None);
    }

    #[tokio::test]
    async fn test_run_query_surfaces_query_errors() {
        let state = seeded_state().await;
        let err = handle_run_query(
            State(state),
            Json(AdhocQueryRequest {
                sql: "SELECT FROM WHERE".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Query(_)));
    }
}
