//! Practice session rows and read-side assembly

use crate::db::catalog;
use crate::db::models::{PracticeSession, SessionDetail};
use crate::db::results;
use crate::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Default display name for a session started without one,
/// e.g. `Intro Practice - Aug 06, 2026 02:15 PM`.
pub fn default_session_name(challenge_title: &str, started_at: DateTime<Utc>) -> String {
    format!(
        "{} Practice - {}",
        challenge_title,
        started_at.format("%b %d, %Y %I:%M %p")
    )
}

/// Create a session in `started` state.
///
/// Callers resolve the challenge first (its title feeds the default name);
/// a dangling challenge id fails on the foreign key.
pub async fn create_session(
    pool: &SqlitePool,
    user_id: i64,
    challenge_id: i64,
    name: Option<String>,
) -> Result<PracticeSession> {
    let started_at = Utc::now();

    let name = match name.filter(|n| !n.trim().is_empty()) {
        Some(name) => name,
        None => {
            let challenge = catalog::fetch_challenge(pool, challenge_id)
                .await?
                .ok_or_else(|| {
                    crate::Error::NotFound(format!("Challenge {} not found", challenge_id))
                })?;
            default_session_name(&challenge.title, started_at)
        }
    };

    let result = sqlx::query(
        "INSERT INTO practice_sessions (user_id, challenge_id, name, started_at, status) \
         VALUES (?, ?, ?, ?, 'started')",
    )
    .bind(user_id)
    .bind(challenge_id)
    .bind(&name)
    .bind(started_at)
    .execute(pool)
    .await?;

    fetch_session(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| crate::Error::Internal("Inserted session row not found".to_string()))
}

pub async fn fetch_session(pool: &SqlitePool, id: i64) -> Result<Option<PracticeSession>> {
    let session =
        sqlx::query_as::<_, PracticeSession>("SELECT * FROM practice_sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(session)
}

/// A user's sessions, newest first
pub async fn list_sessions_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<PracticeSession>> {
    let sessions = sqlx::query_as::<_, PracticeSession>(
        "SELECT * FROM practice_sessions WHERE user_id = ? ORDER BY started_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(sessions)
}

/// Assemble the full session read model: session + challenge + category +
/// level + result. One explicit query step, no lazy traversal.
pub async fn load_session_detail(pool: &SqlitePool, id: i64) -> Result<Option<SessionDetail>> {
    let session = match fetch_session(pool, id).await? {
        Some(session) => session,
        None => return Ok(None),
    };

    let context = catalog::fetch_challenge_context(pool, session.challenge_id)
        .await?
        .ok_or_else(|| {
            crate::Error::NotFound(format!(
                "Challenge {} for session {} not found",
                session.challenge_id, session.id
            ))
        })?;

    let result = results::fetch_result_for_session(pool, session.id).await?;

    Ok(Some(SessionDetail {
        session,
        challenge: context.challenge,
        category: context.category,
        level: context.level,
        result,
    }))
}
