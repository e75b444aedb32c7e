//! speakfit-api library - SpeakFit HTTP service
//!
//! Exposes the application state and router so integration tests can drive
//! the service in-process.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod analysis;
pub mod api;
pub mod error;
pub mod pipeline;

pub use error::{ApiError, ApiResult};

use analysis::SpeechAnalyzer;

/// Request body cap: the 10 MB audio limit plus multipart overhead
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Speech-analysis engine client (stubbed in tests)
    pub analyzer: Arc<dyn SpeechAnalyzer>,
    /// Scratch directory for staged uploads
    pub uploads_dir: PathBuf,
}

impl AppState {
    pub fn new(db: SqlitePool, analyzer: Arc<dyn SpeechAnalyzer>, uploads_dir: PathBuf) -> Self {
        Self {
            db,
            analyzer,
            uploads_dir,
        }
    }
}

/// Build the application router.
///
/// `/api/v1` routes require bearer-token authentication; `/health` does not.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/v1/practice-sessions",
            post(api::start_session).get(api::list_sessions),
        )
        .route("/api/v1/practice-sessions/:id", get(api::show_session))
        .route("/api/v1/recordings", post(api::store_recording))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    let public = api::health_routes();

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
