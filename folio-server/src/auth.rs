//! Admin bearer-token authentication.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Proof that a request carried the admin bearer token.
///
/// Handlers take this as an argument: holding an `AdminSession` is the
/// only way into the admin surface, and the validation core never
/// consults it.
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));

        match token {
            Some(t) if !state.admin_token().is_empty() && t == state.admin_token() => {
                Ok(AdminSession)
            }
            _ => {
                debug!(path = %parts.uri.path(), "rejected admin request");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
