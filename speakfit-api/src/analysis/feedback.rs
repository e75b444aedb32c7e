//! Feedback formatting
//!
//! Pure transforms from an [`AnalysisResponse`] to the two persisted shapes:
//! the human-readable feedback text and the flat metadata record. Line order
//! in the feedback text is fixed; tests snapshot it.

use super::AnalysisResponse;
use serde_json::{json, Value};

/// Build the multi-line feedback summary shown to the user.
pub fn build_feedback(analysis: &AnalysisResponse) -> String {
    let mut lines = vec![
        format!(
            "Overall Rating: {}",
            analysis.overall_rating.as_deref().unwrap_or_default()
        ),
        format!("Confidence Score: {}/100", analysis.confidence_score),
        format!("Fluency Score: {}/100", analysis.fluency_score),
        format!("Words Per Minute: {}", analysis.wpm),
        format!("Word Count: {}", analysis.word_count),
        format!("Duration: {}s", analysis.duration_seconds),
        format!("Filler Words: {}", analysis.filler_count),
        format!("Total Pauses: {}", analysis.total_pauses),
        format!("Total Hesitations: {}", analysis.total_hesitations),
    ];

    if !analysis.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations:".to_string());
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, rec));
        }
    }

    lines.join("\n")
}

/// Build the flat metadata record persisted alongside the result.
pub fn build_metadata(analysis: &AnalysisResponse) -> Value {
    json!({
        "improved_text": analysis.improved_text,
        "tts_speech": analysis.tts_speech,
        "cleaned_text": analysis.cleaned_text,
        "filler_words": analysis.filler_words,
        "filler_count": analysis.filler_count,
        "duration_seconds": analysis.duration_seconds,
        "word_count": analysis.word_count,
        "wpm": analysis.wpm,
        "total_pauses": analysis.total_pauses,
        "total_hesitations": analysis.total_hesitations,
        "pause_durations": analysis.pause_durations,
        "average_pause_duration": analysis.average_pause_duration,
        "total_pause_time": analysis.total_pause_time,
        "hesitation_words": analysis.hesitation_words,
        "fluency_score": analysis.fluency_score,
        "pause_ratio": analysis.pause_ratio,
        "hesitation_rate": analysis.hesitation_rate,
        "wpm_score": analysis.wpm_score,
        "filler_score": analysis.filler_score,
        "pause_score": analysis.pause_score,
        "hesitation_score": analysis.hesitation_score,
        "overall_rating": analysis.overall_rating,
        "recommendations": analysis.recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> AnalysisResponse {
        serde_json::from_str(
            r#"{
                "text": "Hello team",
                "confidence_score": 78,
                "overall_rating": "Good",
                "fluency_score": 82,
                "wpm": 130,
                "word_count": 98,
                "duration_seconds": 45.2,
                "filler_count": 3,
                "total_pauses": 5,
                "total_hesitations": 2,
                "recommendations": ["Slow down"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn feedback_lines_are_in_fixed_order() {
        let feedback = build_feedback(&sample_response());
        let expected = "Overall Rating: Good\n\
                        Confidence Score: 78/100\n\
                        Fluency Score: 82/100\n\
                        Words Per Minute: 130\n\
                        Word Count: 98\n\
                        Duration: 45.2s\n\
                        Filler Words: 3\n\
                        Total Pauses: 5\n\
                        Total Hesitations: 2\n\
                        \n\
                        Recommendations:\n\
                        1. Slow down";
        assert_eq!(feedback, expected);
    }

    #[test]
    fn recommendations_block_is_omitted_when_empty() {
        let mut response = sample_response();
        response.recommendations.clear();

        let feedback = build_feedback(&response);
        assert!(!feedback.contains("Recommendations:"));
        assert!(feedback.ends_with("Total Hesitations: 2"));
    }

    #[test]
    fn feedback_is_deterministic() {
        let response = sample_response();
        assert_eq!(build_feedback(&response), build_feedback(&response));
    }

    #[test]
    fn metadata_applies_defaults_for_absent_fields() {
        let response: AnalysisResponse = serde_json::from_str("{}").unwrap();
        let metadata = build_metadata(&response);

        assert_eq!(metadata["filler_count"], 0);
        assert_eq!(metadata["wpm"], 0.0);
        assert_eq!(metadata["filler_words"], json!([]));
        assert_eq!(metadata["pause_durations"], json!([]));
        assert_eq!(metadata["recommendations"], json!([]));
        assert_eq!(metadata["improved_text"], Value::Null);
        assert_eq!(metadata["overall_rating"], Value::Null);
        assert_eq!(metadata["tts_speech"], Value::Null);
    }

    #[test]
    fn metadata_copies_every_enumerated_field() {
        let metadata = build_metadata(&sample_response());

        for key in [
            "improved_text",
            "tts_speech",
            "cleaned_text",
            "filler_words",
            "filler_count",
            "duration_seconds",
            "word_count",
            "wpm",
            "total_pauses",
            "total_hesitations",
            "pause_durations",
            "average_pause_duration",
            "total_pause_time",
            "hesitation_words",
            "fluency_score",
            "pause_ratio",
            "hesitation_rate",
            "wpm_score",
            "filler_score",
            "pause_score",
            "hesitation_score",
            "overall_rating",
            "recommendations",
        ] {
            assert!(metadata.get(key).is_some(), "missing metadata key {}", key);
        }

        assert_eq!(metadata["filler_count"], 3);
        assert_eq!(metadata["overall_rating"], "Good");
    }
}
