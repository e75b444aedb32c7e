//! Analysis engine response shape
//!
//! The engine may omit any field; every numeric defaults to 0 and every
//! sequence to empty so partial responses still parse. Optional text/object
//! fields stay `None`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Transcription of the recording
    #[serde(default)]
    pub text: String,

    /// Overall confidence score, 0-100
    #[serde(default)]
    pub confidence_score: f64,

    /// Excellent / Good / Moderate / Low / Very Low
    #[serde(default)]
    pub overall_rating: Option<String>,

    #[serde(default)]
    pub fluency_score: f64,

    /// Speaking pace in words per minute
    #[serde(default)]
    pub wpm: f64,

    #[serde(default)]
    pub word_count: i64,

    #[serde(default)]
    pub duration_seconds: f64,

    #[serde(default)]
    pub filler_count: i64,

    #[serde(default)]
    pub filler_words: Vec<String>,

    #[serde(default)]
    pub total_pauses: i64,

    #[serde(default)]
    pub total_hesitations: i64,

    #[serde(default)]
    pub pause_durations: Vec<f64>,

    #[serde(default)]
    pub average_pause_duration: f64,

    #[serde(default)]
    pub total_pause_time: f64,

    #[serde(default)]
    pub hesitation_words: Vec<String>,

    #[serde(default)]
    pub pause_ratio: f64,

    #[serde(default)]
    pub hesitation_rate: f64,

    // Derived sub-scores
    #[serde(default)]
    pub wpm_score: f64,

    #[serde(default)]
    pub filler_score: f64,

    #[serde(default)]
    pub pause_score: f64,

    #[serde(default)]
    pub hesitation_score: f64,

    /// Ordered coaching recommendations
    #[serde(default)]
    pub recommendations: Vec<String>,

    /// Engine-rewritten version of the transcript
    #[serde(default)]
    pub improved_text: Option<String>,

    #[serde(default)]
    pub cleaned_text: Option<String>,

    /// Optional TTS payload, passed through opaquely
    #[serde(default)]
    pub tts_speech: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_parses_with_defaults() {
        let response: AnalysisResponse = serde_json::from_str("{}").unwrap();

        assert_eq!(response.text, "");
        assert_eq!(response.confidence_score, 0.0);
        assert_eq!(response.word_count, 0);
        assert!(response.filler_words.is_empty());
        assert!(response.pause_durations.is_empty());
        assert!(response.recommendations.is_empty());
        assert!(response.overall_rating.is_none());
        assert!(response.improved_text.is_none());
        assert!(response.tts_speech.is_none());
    }

    #[test]
    fn partial_body_keeps_present_fields_and_defaults_the_rest() {
        let response: AnalysisResponse = serde_json::from_str(
            r#"{"text": "Hello team", "confidence_score": 78, "wpm": 130.5}"#,
        )
        .unwrap();

        assert_eq!(response.text, "Hello team");
        assert_eq!(response.confidence_score, 78.0);
        assert_eq!(response.wpm, 130.5);
        assert_eq!(response.fluency_score, 0.0);
        assert_eq!(response.total_pauses, 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let response: AnalysisResponse =
            serde_json::from_str(r#"{"text": "ok", "engine_debug": {"a": 1}}"#).unwrap();
        assert_eq!(response.text, "ok");
    }
}
