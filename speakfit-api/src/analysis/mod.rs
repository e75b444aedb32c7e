//! Speech-analysis engine integration
//!
//! The engine is an external HTTP service that takes an audio file plus
//! challenge context and returns transcription, fluency scoring, and
//! recommendations. Everything downstream consumes it through the
//! [`SpeechAnalyzer`] trait so the recording pipeline can be exercised with
//! a stub analyzer in tests.

use async_trait::async_trait;
use std::path::Path;

pub mod client;
pub mod feedback;
pub mod response;

pub use client::{AnalysisClient, AnalysisError};
pub use response::AnalysisResponse;

/// A single-shot speech analysis call: one request, one response, no retry.
#[async_trait]
pub trait SpeechAnalyzer: Send + Sync {
    /// Analyze the audio file at `audio_path`, recorded for a challenge with
    /// the given level name, category name, and title. `original_filename`
    /// is the client-supplied name forwarded to the engine.
    async fn analyze(
        &self,
        audio_path: &Path,
        level: &str,
        category: &str,
        title: &str,
        original_filename: &str,
    ) -> Result<AnalysisResponse, AnalysisError>;
}
