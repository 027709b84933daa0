//! Bearer-token authentication for admin endpoints.
//!
//! Mutating handlers take an [`AdminSession`] argument. The extractor reads
//! `Authorization: Bearer <token>` and verifies the token with the server's
//! [`SessionTokens`](crate::auth::SessionTokens):
//!
//! ```text
//! no header / not Bearer     -> 401 missing_token
//! bad signature / malformed  -> 403 invalid_token
//! expired                    -> 403 token_expired
//! ```
//!
//! Read endpoints never take the extractor and stay public.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use crate::auth::{AuthError, Identity};
use crate::store::ContentRepository;

use super::handlers::{AppState, ErrorResponse};

// =============================================================================
// Error Mapping
// =============================================================================

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token"),
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "invalid_token"),
            AuthError::Expired { .. } => (StatusCode::FORBIDDEN, "token_expired"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AuthError::Hashing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "hashing_error"),
            AuthError::Signing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "signing_error"),
        };
        let message = self.to_string();

        // A forged token or a failed login could be an attack, so log at warn level.
        // Expired sessions and missing headers are routine.
        match &self {
            AuthError::InvalidToken | AuthError::InvalidCredentials => {
                warn!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Authentication failed: {}",
                    message
                );
            }
            AuthError::Hashing(_) | AuthError::Signing(_) => {
                error!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Server error: {}",
                    message
                );
            }
            _ => {
                debug!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Authentication failed: {}",
                    message
                );
            }
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Extractor
// =============================================================================

/// An authenticated admin, extracted from the request's bearer token.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Identity);

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl<R: ContentRepository> FromRequestParts<AppState<R>> for AdminSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;
        let claims = state.tokens.verify(token)?;
        Ok(AdminSession(Identity::from(claims)))
    }
}

/// Token from an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

// =============================================================================
// Tests
// =============================================================================
