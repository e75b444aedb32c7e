//! Recording intake pipeline
//!
//! Orchestrates one uploaded recording end to end: ownership validation,
//! the single analysis call, outcome branching, and the transactional
//! result-insert + session-update. An analysis failure never aborts the
//! request; the caller always gets a durable session/result pair back.

pub mod storage;

use crate::analysis::{feedback, AnalysisError, SpeechAnalyzer};
use crate::error::{ApiError, ApiResult};
use serde_json::json;
use speakfit_common::db::models::{PracticeResult, SessionDetail, SessionStatus};
use speakfit_common::db::{catalog, results, sessions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{error, info};

/// Feedback stored when the engine rejects the recording's language (HTTP 400)
pub const LANGUAGE_FEEDBACK: &str = "Please speak in English. Other languages are not accepted.";

/// Feedback stored for every other analysis failure
pub const RETRY_FEEDBACK: &str = "Analysis could not be completed. Please try again.";

/// Everything persisted for one recording submission
#[derive(Debug)]
pub struct RecordingOutcome {
    pub detail: SessionDetail,
    pub result: PracticeResult,
}

/// Fields computed from the analysis outcome, success or failure
#[derive(Debug)]
pub struct ResultFields {
    pub transcription: String,
    pub feedback: String,
    pub improved_text: Option<String>,
    pub score: f64,
    pub metadata: serde_json::Value,
    pub status: SessionStatus,
}

/// Process one uploaded recording for a session.
///
/// Exactly one result row is created and exactly one session update applied
/// per call, atomically. Re-submission for a session that already has a
/// result is rejected with a conflict.
pub async fn submit_recording(
    db: &SqlitePool,
    analyzer: &dyn SpeechAnalyzer,
    session_id: i64,
    caller_user_id: i64,
    audio_path: &Path,
    original_filename: &str,
) -> ApiResult<RecordingOutcome> {
    let session = sessions::fetch_session(db, session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Practice session {} not found", session_id)))?;

    if session.user_id != caller_user_id {
        return Err(ApiError::Forbidden(format!(
            "Practice session {} does not belong to the caller",
            session_id
        )));
    }

    if session.status.is_terminal() || results::session_has_result(db, session.id).await? {
        return Err(ApiError::Conflict(format!(
            "Practice session {} already has a result",
            session_id
        )));
    }

    let context = catalog::fetch_challenge_context(db, session.challenge_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Challenge {} for session {} not found",
                session.challenge_id, session_id
            ))
        })?;

    let fields = match analyzer
        .analyze(
            audio_path,
            &context.level.name,
            &context.category.name,
            &context.challenge.title,
            original_filename,
        )
        .await
    {
        Ok(analysis) => {
            info!(
                session_id = session.id,
                score = analysis.confidence_score,
                "Speech analysis succeeded"
            );
            ResultFields {
                transcription: analysis.text.clone(),
                feedback: feedback::build_feedback(&analysis),
                improved_text: analysis.improved_text.clone(),
                score: analysis.confidence_score,
                metadata: feedback::build_metadata(&analysis),
                status: SessionStatus::Processed,
            }
        }
        Err(err) => failure_fields(session.id, &err),
    };

    storage::persist_outcome(db, session.id, &fields).await?;

    // Read-side assembly: return the refreshed session with challenge,
    // category, level, and result loaded.
    let detail = sessions::load_session_detail(db, session.id)
        .await?
        .ok_or_else(|| ApiError::Internal("Session disappeared after persist".to_string()))?;

    let result = detail
        .result
        .clone()
        .ok_or_else(|| ApiError::Internal("Result missing after persist".to_string()))?;

    Ok(RecordingOutcome { detail, result })
}

/// Result fields for a failed analysis. HTTP 400 from the engine signals a
/// language mismatch and gets language guidance; everything else gets the
/// generic retry message.
fn failure_fields(session_id: i64, err: &AnalysisError) -> ResultFields {
    error!(
        session_id = session_id,
        http_status = ?err.http_status(),
        error = %err,
        "Speech analysis failed"
    );

    let feedback = match err.http_status() {
        Some(400) => LANGUAGE_FEEDBACK,
        _ => RETRY_FEEDBACK,
    };

    ResultFields {
        transcription: String::new(),
        feedback: feedback.to_string(),
        improved_text: None,
        score: 0.0,
        metadata: json!({ "error": err.to_string() }),
        status: SessionStatus::Failed,
    }
}
