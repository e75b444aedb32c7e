//! Transactional persistence for recording outcomes
//!
//! The result insert and the session status update commit together: a
//! session is never observable as `processed`/`failed` without its result,
//! and never carries a result while still `started`.

use super::ResultFields;
use chrono::Utc;
use speakfit_common::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// Write the result row and the session's terminal status in one transaction.
pub async fn persist_outcome(
    db: &SqlitePool,
    session_id: i64,
    fields: &ResultFields,
) -> Result<()> {
    let completed_at = Utc::now();
    let metadata = serde_json::to_string(&fields.metadata)
        .map_err(|e| speakfit_common::Error::Internal(format!("Metadata serialization: {}", e)))?;

    let mut tx = db.begin().await?;

    sqlx::query(
        "INSERT INTO practice_results \
         (practice_session_id, transcription, feedback, improved_text, score, metadata, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(session_id)
    .bind(&fields.transcription)
    .bind(&fields.feedback)
    .bind(&fields.improved_text)
    .bind(fields.score)
    .bind(&metadata)
    .bind(completed_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE practice_sessions SET status = ?, completed_at = ? WHERE id = ?")
        .bind(fields.status)
        .bind(completed_at)
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    debug!(
        session_id = session_id,
        status = fields.status.as_str(),
        "Persisted recording outcome"
    );

    Ok(())
}
