use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::insights::aggregates::{title_word_counts, top_companies, top_locations, ValueCount};
use crate::insights::skills::{skill_frequencies, SkillCount};
use crate::insights::trend::{cumulative_mentions, MentionPoint, TREND_SKILL};
use crate::listings::filter::fetch_filtered;
use crate::listings::handlers::{FilterParams, EMPTY_RESULT_MESSAGE};
use crate::listings::schema::has_column;
use crate::models::listing::ListingRow;
use crate::state::AppState;

/// Everything the dashboard renders in one payload. A section whose backing
/// column is missing from the store is `None`, with a warning explaining
/// why; the other sections are unaffected.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total: usize,
    pub listings: Vec<ListingRow>,
    pub message: Option<String>,
    pub skill_counts: Option<Vec<SkillCount>>,
    pub python_trend: Option<Vec<MentionPoint>>,
    pub top_locations: Option<Vec<ValueCount>>,
    pub top_companies: Option<Vec<ValueCount>>,
    pub title_words: Option<Vec<ValueCount>>,
    pub warnings: Vec<String>,
}

/// GET /api/v1/dashboard
///
/// Runs the shared filter once and derives every insight from that single
/// result set, so all sections agree on which listings are in scope.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DashboardResponse>, AppError> {
    let filtered = fetch_filtered(&state.db, &params.into_filter()).await?;
    let mut warnings = filtered.warnings;

    if filtered.columns.is_empty() {
        // No table yet; the single warning from the fetch covers it.
        return Ok(Json(DashboardResponse {
            total: 0,
            listings: vec![],
            message: None,
            skill_counts: None,
            python_trend: None,
            top_locations: None,
            top_companies: None,
            title_words: None,
            warnings,
        }));
    }

    let listings = filtered.listings;
    let total = listings.len();
    let message = if total == 0 {
        Some(EMPTY_RESULT_MESSAGE.to_string())
    } else {
        None
    };

    let (skill_counts, python_trend) = if has_column(&filtered.columns, "description") {
        (
            Some(skill_frequencies(&listings)),
            Some(cumulative_mentions(&listings, TREND_SKILL)),
        )
    } else {
        warnings.push(
            "No 'description' column found; skill counts and Python trend skipped.".to_string(),
        );
        (None, None)
    };

    let locations = if has_column(&filtered.columns, "location") {
        Some(top_locations(&listings))
    } else {
        warnings.push("No 'location' column found; top locations skipped.".to_string());
        None
    };

    let companies = if has_column(&filtered.columns, "company") {
        Some(top_companies(&listings))
    } else {
        warnings.push("No 'company' column found; top companies skipped.".to_string());
        None
    };

    let title_words = if has_column(&filtered.columns, "position_name") {
        Some(title_word_counts(&listings))
    } else {
        warnings.push("No 'position_name' column found; title words skipped.".to_string());
        None
    };

    Ok(Json(DashboardResponse {
        total,
        listings,
        message,
        skill_counts,
        python_trend,
        top_locations: locations,
        top_companies: companies,
        title_words,
        warnings,
    }))
}
