//! Response view structs
//!
//! Explicit serializable shapes for everything the API returns, assembled
//! from the read models after persistence. Nested objects are present only
//! when loaded, mirroring the session detail assembly.

use serde::Serialize;
use speakfit_common::db::models::{
    Category, Challenge, Level, PracticeResult, PracticeSession, SessionDetail,
};

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl CategoryView {
    pub fn from_model(category: &Category) -> Self {
        Self {
            id: category.id,
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            icon: category.icon.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LevelView {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub color: Option<String>,
    pub min_score: i64,
}

impl LevelView {
    pub fn from_model(level: &Level) -> Self {
        Self {
            id: level.id,
            slug: level.slug.clone(),
            name: level.name.clone(),
            color: level.color.clone(),
            min_score: level.min_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChallengeView {
    pub id: i64,
    pub title: String,
    pub suggested_time_minutes: i64,
    pub hints_available: i64,
    pub tips: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LevelView>,
}

impl ChallengeView {
    pub fn from_model(
        challenge: &Challenge,
        category: Option<&Category>,
        level: Option<&Level>,
    ) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title.clone(),
            suggested_time_minutes: challenge.suggested_time_minutes,
            hints_available: challenge.hints_available,
            tips: challenge.tips.as_ref().map(|t| t.0.clone()),
            category: category.map(CategoryView::from_model),
            level: level.map(LevelView::from_model),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResultView {
    pub id: i64,
    pub transcription: String,
    pub feedback: String,
    pub improved_text: Option<String>,
    pub score: f64,
    pub metadata: serde_json::Value,
}

impl ResultView {
    pub fn from_model(result: &PracticeResult) -> Self {
        Self {
            id: result.id,
            transcription: result.transcription.clone(),
            feedback: result.feedback.clone(),
            improved_text: result.improved_text.clone(),
            score: result.score,
            metadata: result.metadata.0.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<ChallengeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
}

impl SessionView {
    /// Bare session, no nested objects (session-start response)
    pub fn bare(session: &PracticeSession) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            status: session.status.as_str().to_string(),
            started_at: session.started_at,
            completed_at: session.completed_at,
            challenge: None,
            result: None,
        }
    }

    /// Fully-populated view from the assembled session detail
    pub fn from_detail(detail: &SessionDetail) -> Self {
        Self {
            id: detail.session.id,
            name: detail.session.name.clone(),
            status: detail.session.status.as_str().to_string(),
            started_at: detail.session.started_at,
            completed_at: detail.session.completed_at,
            challenge: Some(ChallengeView::from_model(
                &detail.challenge,
                Some(&detail.category),
                Some(&detail.level),
            )),
            result: detail.result.as_ref().map(ResultView::from_model),
        }
    }
}

/// Recording submission response: the refreshed session plus its result
#[derive(Debug, Serialize)]
pub struct RecordingResponse {
    pub session: SessionView,
    pub result: ResultView,
}
