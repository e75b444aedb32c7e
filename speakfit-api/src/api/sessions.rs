//! Practice session endpoints: start, list, show

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use speakfit_common::db::{catalog, sessions};
use tracing::info;

use super::auth::CurrentUser;
use super::views::SessionView;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub challenge_id: i64,
    /// Optional display name; auto-generated from the challenge title when absent
    pub name: Option<String>,
}

/// POST /api/v1/practice-sessions
///
/// Start a practice session for a challenge. The session begins in
/// `started` state and stays there until a recording is submitted.
pub async fn start_session(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<StartSessionRequest>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let challenge = catalog::fetch_challenge(&state.db, request.challenge_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Challenge {} not found", request.challenge_id))
        })?;

    let session =
        sessions::create_session(&state.db, user.id, challenge.id, request.name).await?;

    info!(
        session_id = session.id,
        user_id = user.id,
        challenge_id = challenge.id,
        "Started practice session"
    );

    Ok((StatusCode::CREATED, Json(SessionView::bare(&session))))
}

/// GET /api/v1/practice-sessions
///
/// The caller's sessions, newest first, with challenge and result loaded.
pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<SessionView>>> {
    let mut views = Vec::new();

    for session in sessions::list_sessions_for_user(&state.db, user.id).await? {
        let detail = sessions::load_session_detail(&state.db, session.id)
            .await?
            .ok_or_else(|| ApiError::Internal("Listed session disappeared".to_string()))?;
        views.push(SessionView::from_detail(&detail));
    }

    Ok(Json(views))
}

/// GET /api/v1/practice-sessions/{id}
///
/// Full session detail: challenge, category, level, and result when present.
pub async fn show_session(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(session_id): Path<i64>,
) -> ApiResult<Json<SessionView>> {
    let detail = sessions::load_session_detail(&state.db, session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Practice session {} not found", session_id)))?;

    if detail.session.user_id != user.id {
        return Err(ApiError::Forbidden(format!(
            "Practice session {} does not belong to the caller",
            session_id
        )));
    }

    Ok(Json(SessionView::from_detail(&detail)))
}
