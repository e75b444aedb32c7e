//! Bearer-token authentication middleware
//!
//! Validates `Authorization: Bearer <token>` against the `api_tokens` table
//! (hashed lookup) and attaches the owning user to the request. Token
//! issuance happens out-of-band; this layer only validates.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use speakfit_common::db::models::User;
use speakfit_common::db::tokens;
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller, available to handlers as a request extension
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authentication middleware for the `/api/v1` routes.
///
/// The health endpoint does NOT use this middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let user = tokens::authenticate_token(&state.db, &token)
        .await?
        .ok_or_else(|| {
            warn!("Rejected request with unknown bearer token");
            ApiError::Unauthorized("Invalid bearer token".to_string())
        })?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
