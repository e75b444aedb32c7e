//! Practice result rows
//!
//! Results are written exclusively by the recording pipeline, inside its
//! transaction; this module holds the read side.

use crate::db::models::PracticeResult;
use crate::Result;
use sqlx::SqlitePool;

pub async fn fetch_result_for_session(
    pool: &SqlitePool,
    session_id: i64,
) -> Result<Option<PracticeResult>> {
    let result = sqlx::query_as::<_, PracticeResult>(
        "SELECT * FROM practice_results WHERE practice_session_id = ?",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;
    Ok(result)
}

pub async fn session_has_result(pool: &SqlitePool, session_id: i64) -> Result<bool> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM practice_results WHERE practice_session_id = ?")
            .bind(session_id)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}
