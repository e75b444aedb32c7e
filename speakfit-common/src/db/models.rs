//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Practice session lifecycle status.
///
/// Stored as TEXT. `Recorded` exists in the schema but is never written by
/// the recording pipeline; a session goes straight from `started` to a
/// terminal `processed`/`failed` on its single analysis attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SessionStatus {
    Started,
    Recorded,
    Processed,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Started => "started",
            SessionStatus::Recorded => "recorded",
            SessionStatus::Processed => "processed",
            SessionStatus::Failed => "failed",
        }
    }

    /// True once the session has received its analysis outcome
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Processed | SessionStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Level {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub min_score: i64,
    pub sort_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Challenge {
    pub id: i64,
    pub category_id: i64,
    pub level_id: i64,
    pub title: String,
    pub suggested_time_minutes: i64,
    pub hints_available: i64,
    pub tips: Option<Json<Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PracticeSession {
    pub id: i64,
    pub user_id: i64,
    pub challenge_id: i64,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PracticeResult {
    pub id: i64,
    pub practice_session_id: i64,
    pub transcription: String,
    pub feedback: String,
    pub improved_text: Option<String>,
    pub score: f64,
    pub metadata: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Fully-assembled session read model: the session with its challenge,
/// category, level, and result (when present) loaded in one explicit step.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail {
    pub session: PracticeSession,
    pub challenge: Challenge,
    pub category: Category,
    pub level: Level,
    pub result: Option<PracticeResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_match_schema_values() {
        assert_eq!(SessionStatus::Started.as_str(), "started");
        assert_eq!(SessionStatus::Recorded.as_str(), "recorded");
        assert_eq!(SessionStatus::Processed.as_str(), "processed");
        assert_eq!(SessionStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn only_processed_and_failed_are_terminal() {
        assert!(!SessionStatus::Started.is_terminal());
        assert!(!SessionStatus::Recorded.is_terminal());
        assert!(SessionStatus::Processed.is_terminal());
        assert!(SessionStatus::Failed.is_terminal());
    }
}
