//! Recording upload endpoint
//!
//! Accepts the multipart upload, performs the request-level validation
//! (fields present, accepted format, size cap), stages the audio to a
//! scratch file, and hands off to the recording pipeline.

use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use tracing::warn;
use uuid::Uuid;

use super::auth::CurrentUser;
use super::views::{RecordingResponse, ResultView, SessionView};
use crate::error::{ApiError, ApiResult};
use crate::pipeline;
use crate::AppState;

/// Accepted upload formats, by filename extension
const ACCEPTED_EXTENSIONS: [&str; 3] = ["mp3", "wav", "m4a"];

/// Upload size cap: 10 MB
const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

/// One validated upload: the original filename and the audio bytes
struct AudioUpload {
    filename: String,
    bytes: Vec<u8>,
}

/// POST /api/v1/recordings
///
/// Multipart form: `practice_session_id` (text) + `audio` (file).
/// Responds with the refreshed session and its result; analysis failures
/// still produce a result (with `failed` session status), never a 5xx.
pub async fn store_recording(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    multipart: Multipart,
) -> ApiResult<Json<RecordingResponse>> {
    let (session_id, upload) = read_upload(multipart).await?;

    // Stage the audio under the uploads folder; the pipeline only sees a path
    tokio::fs::create_dir_all(&state.uploads_dir).await?;
    let extension = file_extension(&upload.filename).unwrap_or_else(|| "bin".to_string());
    let staged_path = state
        .uploads_dir
        .join(format!("{}.{}", Uuid::new_v4(), extension));
    tokio::fs::write(&staged_path, &upload.bytes).await?;

    let outcome = pipeline::submit_recording(
        &state.db,
        state.analyzer.as_ref(),
        session_id,
        user.id,
        &staged_path,
        &upload.filename,
    )
    .await;

    if let Err(err) = tokio::fs::remove_file(&staged_path).await {
        warn!(
            path = %staged_path.display(),
            error = %err,
            "Failed to remove staged upload"
        );
    }

    let outcome = outcome?;

    Ok(Json(RecordingResponse {
        session: SessionView::from_detail(&outcome.detail),
        result: ResultView::from_model(&outcome.result),
    }))
}

/// Read and validate the multipart form. All violations map to 422; the
/// routing/validation layer owns these checks, not the pipeline.
async fn read_upload(mut multipart: Multipart) -> ApiResult<(i64, AudioUpload)> {
    let mut session_id: Option<i64> = None;
    let mut upload: Option<AudioUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Unprocessable(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("practice_session_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Unprocessable(format!("Unreadable field: {}", e)))?;
                let parsed = value.trim().parse::<i64>().map_err(|_| {
                    ApiError::Unprocessable("practice_session_id must be an integer".to_string())
                })?;
                session_id = Some(parsed);
            }
            Some("audio") => {
                let filename = field
                    .file_name()
                    .map(|n| n.to_string())
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| {
                        ApiError::Unprocessable("The audio field must be a file".to_string())
                    })?;

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Unprocessable(format!("Unreadable upload: {}", e)))?;

                upload = Some(AudioUpload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let session_id = session_id.ok_or_else(|| {
        ApiError::Unprocessable("The practice_session_id field is required".to_string())
    })?;
    let upload =
        upload.ok_or_else(|| ApiError::Unprocessable("The audio field is required".to_string()))?;

    let extension = file_extension(&upload.filename);
    if !matches!(extension.as_deref(), Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext)) {
        return Err(ApiError::Unprocessable(
            "The audio file must be an mp3, wav, or m4a".to_string(),
        ));
    }

    if upload.bytes.is_empty() {
        return Err(ApiError::Unprocessable(
            "The audio file is empty".to_string(),
        ));
    }
    if upload.bytes.len() > MAX_AUDIO_BYTES {
        return Err(ApiError::Unprocessable(
            "The audio file may not be larger than 10 MB".to_string(),
        ));
    }

    Ok((session_id, upload))
}

fn file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("talk.MP3").as_deref(), Some("mp3"));
        assert_eq!(file_extension("talk.wav").as_deref(), Some("wav"));
        assert_eq!(file_extension("no-extension"), None);
    }
}
