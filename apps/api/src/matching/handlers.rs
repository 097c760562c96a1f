use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::listings::filter::{fetch_filtered, ListingFilter};
use crate::matching::matcher::{match_by_skills, SkillMatchReport};
use crate::matching::resume::{analyze_gap, parse_resume_skills, suggest_listings, GapReport};
use crate::models::listing::ListingRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub total: usize,
    pub listings: Vec<ListingRow>,
    pub guidance: Option<String>,
    pub warnings: Vec<String>,
}

/// POST /api/v1/match
///
/// Applies the shared location/keyword filter first, then OR-matches the
/// selected skills against the filtered descriptions.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let filter = ListingFilter::from_params(req.location, req.keyword);
    let filtered = fetch_filtered(&state.db, &filter).await?;
    let report = match_by_skills(&filtered.listings, &req.skills)?;
    Ok(Json(MatchResponse {
        total: report.total,
        listings: report.listings,
        guidance: report.guidance,
        warnings: filtered.warnings,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub resume_text: String,
    pub location: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub gap: GapReport,
    pub suggestions: SkillMatchReport,
    pub warnings: Vec<String>,
}

/// POST /api/v1/resume
///
/// Parses the pasted resume once, then reports the vocabulary gap and
/// suggests listings from the filtered set that mention any resume term.
pub async fn handle_resume(
    State(state): State<AppState>,
    Json(req): Json<ResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let filter = ListingFilter::from_params(req.location, req.keyword);
    let filtered = fetch_filtered(&state.db, &filter).await?;
    let terms = parse_resume_skills(&req.resume_text);
    let gap = analyze_gap(&terms);
    let suggestions = suggest_listings(&filtered.listings, &terms);
    Ok(Json(ResumeResponse {
        gap,
        suggestions,
        warnings: filtered.warnings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::csv_source::CsvTable;
    use crate::ingest::loader::replace_jobs_table;
    use crate::matching::matcher::NO_SKILLS_SELECTED;
    use crate::matching::resume::NO_RESUME_SKILLS;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn seeded_state() -> AppState {
        let pool: SqlitePool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
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
                    Some("Python and SQL".to_string()),
                ],
                vec![
                    Some("BI Developer".to_string()),
                    Some("Globex".to_string()),
                    Some("Hamburg".to_string()),
                    Some("Tableau plus Excel".to_string()),
                ],
                vec![
                    Some("Backend Engineer".to_string()),
                    Some("Initech".to_string()),
                    Some("Berlin".to_string()),
                    Some("Java services".to_string()),
                ],
            ],
        };
        replace_jobs_table(&pool, &table).await.unwrap();
        AppState { db: pool }
    }

    #[tokio::test]
    async fn test_match_respects_the_shared_filter() {
        let state = seeded_state().await;
        let Json(response) = handle_match(
            State(state),
            Json(MatchRequest {
                skills: vec!["Python".to_string(), "Java".to_string()],
                location: Some("Berlin".to_string()),
                keyword: None,
            }),
        )
        .await
        .unwrap();

        // Globex is filtered out by location before matching.
        assert_eq!(response.total, 2);
        assert!(response.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_match_empty_selection_returns_guidance() {
        let state = seeded_state().await;
        let Json(response) = handle_match(
            State(state),
            Json(MatchRequest {
                skills: vec![],
                location: None,
                keyword: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.total, 0);
        assert_eq!(response.guidance.as_deref(), Some(NO_SKILLS_SELECTED));
    }

    #[tokio::test]
    async fn test_match_unknown_skill_is_validation_error() {
        let state = seeded_state().await;
        let err = handle_match(
            State(state),
            Json(MatchRequest {
                skills: vec!["Blockchain".to_string()],
                location: None,
                keyword: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_resume_reports_gap_and_suggestions() {
        let state = seeded_state().await;
        let Json(response) = handle_resume(
            State(state),
            Json(ResumeRequest {
                resume_text: "python, sql, cobol".to_string(),
                location: None,
                keyword: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.gap.matched, vec!["python", "sql"]);
        assert_eq!(response.gap.missing.len(), 9);
        // Acme mentions both terms; the others mention neither.
        assert_eq!(response.suggestions.total, 1);
        assert_eq!(
            response.suggestions.listings[0].company.as_deref(),
            Some("Acme")
        );
    }

    #[tokio::test]
    async fn test_resume_blank_text_short_circuits() {
        let state = seeded_state().await;
        let Json(response) = handle_resume(
            State(state),
            Json(ResumeRequest {
                resume_text: "   ".to_string(),
                location: None,
                keyword: None,
            }),
        )
        .await
        .unwrap();

        assert!(response.gap.matched.is_empty());
        assert_eq!(response.suggestions.total, 0);
        assert_eq!(
            response.suggestions.guidance.as_deref(),
            Some(NO_RESUME_SKILLS)
        );
    }
}
