//! ebm-sv library - Submissions Server module
//!
//! Stores completed assessments and serves the aggregate views consumed
//! by the company and team dashboards.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use ebm_common::domain::SubmissionRepository;

pub mod api;
pub mod repo;

use repo::SqliteSubmissionRepository;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Submission storage port
    pub repo: Arc<dyn SubmissionRepository>,
}

impl AppState {
    /// Create application state backed by the SQLite repository
    pub fn new(db: SqlitePool) -> Self {
        let repo = Arc::new(SqliteSubmissionRepository::new(db.clone()));
        Self { db, repo }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route(
            "/api/submissions",
            post(api::submit_protocol).get(api::list_submissions),
        )
        .route("/api/submissions/:id", get(api::fetch_submission))
        .route("/api/aggregates/company", get(api::company_summary))
        .route("/api/aggregates/team", get(api::team_comparison))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
