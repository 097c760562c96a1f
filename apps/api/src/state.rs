use sqlx::SqlitePool;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only pool over the listings store.
    pub db: SqlitePool,
}
