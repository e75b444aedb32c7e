//! HTTP client for the speech-analysis engine

use super::{AnalysisResponse, SpeechAnalyzer};
use async_trait::async_trait;
use speakfit_common::config::AnalysisConfig;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info};

const USER_AGENT: &str = concat!("SpeakFit/", env!("CARGO_PKG_VERSION"));
const TRANSCRIBE_PATH: &str = "/api/v1/transcribe";

/// Analysis client errors.
///
/// `Api` carries the engine's HTTP status so the recording pipeline can
/// branch on it (400 is a language-mismatch signal); everything else is a
/// transport- or decode-level failure with no status to branch on.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// Network communication error (connect, timeout, mid-body drop)
    #[error("Network error: {0}")]
    Network(String),

    /// Engine returned a non-success HTTP status
    #[error("Analysis API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse the engine's response JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failed to read the staged audio file
    #[error("Audio read error: {0}")]
    Io(String),
}

impl AnalysisError {
    /// HTTP status of the engine response, when one was received
    pub fn http_status(&self) -> Option<u16> {
        match self {
            AnalysisError::Api(status, _) => Some(*status),
            _ => None,
        }
    }
}

/// Speech-analysis engine client
pub struct AnalysisClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a new client from an injected configuration.
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SpeechAnalyzer for AnalysisClient {
    async fn analyze(
        &self,
        audio_path: &Path,
        level: &str,
        category: &str,
        title: &str,
        original_filename: &str,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let audio_bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| AnalysisError::Io(format!("{}: {}", audio_path.display(), e)))?;

        // MIME sniffed from content, not trusted from the upload
        let mime_type = infer::get(&audio_bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        let file_part = reqwest::multipart::Part::bytes(audio_bytes)
            .file_name(original_filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("level", level.to_string())
            .text("category", category.to_string())
            .text("title", title.to_string());

        let url = format!("{}{}", self.base_url, TRANSCRIBE_PATH);

        debug!(url = %url, filename = %original_filename, "Submitting recording for analysis");

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %body,
                "Speech analysis API failed"
            );
            return Err(AnalysisError::Api(status.as_u16(), body));
        }

        let analysis: AnalysisResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        info!(
            confidence = analysis.confidence_score,
            wpm = analysis.wpm,
            "Speech analysis complete"
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn client_creation_strips_trailing_slash() {
        let config = AnalysisConfig {
            base_url: "http://localhost:9000/".to_string(),
            timeout: Duration::from_secs(5),
        };
        let client = AnalysisClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[test]
    fn only_api_errors_carry_a_status() {
        assert_eq!(AnalysisError::Api(400, "bad".into()).http_status(), Some(400));
        assert_eq!(AnalysisError::Network("down".into()).http_status(), None);
        assert_eq!(AnalysisError::Parse("eof".into()).http_status(), None);
        assert_eq!(AnalysisError::Io("gone".into()).http_status(), None);
    }
}
