pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::insights::handlers as insight_handlers;
use crate::listings::handlers as listing_handlers;
use crate::matching::handlers as match_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/dashboard", get(insight_handlers::handle_dashboard))
        .route("/api/v1/listings", get(listing_handlers::handle_get_listings))
        .route("/api/v1/query", post(listing_handlers::handle_run_query))
        .route("/api/v1/match", post(match_handlers::handle_match))
        .route("/api/v1/resume", post(match_handlers::handle_resume))
        .with_state(state)
}
