//! HTTP request handlers for the content API.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/login` - Exchange credentials for a session token
//! - `GET /api/content` - Every public section in one document
//! - `PUT /api/{hero,contact,services-page,contact-page,site-settings}` - Merge a singleton
//! - `PUT /api/stats` - Replace the stats list
//! - `PUT /api/{header,footer}-visibility` - Replace a visibility map
//! - `GET|POST /api/{services,doctors,reviews,faqs}` - List or create records
//! - `PUT|DELETE /api/{services,doctors,reviews,faqs}/{id}` - Update or delete a record
//! - `POST /api/upload` - Store an uploaded file
//!
//! Every `PUT`, `POST` (except login) and `DELETE` requires an [`AdminSession`].

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::auth::{AuthError, CredentialVerifier, Identity, SessionTokens};
use crate::content::{
    Collection, Fields, Record, Singleton, SiteContent, Stat, UserInfo, Visibility,
    VisibilityArea,
};
use crate::error::{ContentError, UploadError};
use crate::store::{unix_millis, ContentRepository, ContentStore};
use crate::upload::UploadSink;

use super::auth::AdminSession;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<R: ContentRepository> {
    /// The document store
    pub store: Arc<ContentStore<R>>,

    /// Issues and verifies session tokens
    pub tokens: Arc<SessionTokens>,

    /// Checks login credentials
    pub credentials: Arc<CredentialVerifier>,

    /// Destination for uploaded files
    pub uploads: Arc<UploadSink>,
}

impl<R: ContentRepository> AppState<R> {
    pub fn new(
        store: ContentStore<R>,
        tokens: SessionTokens,
        credentials: CredentialVerifier,
        uploads: UploadSink,
    ) -> Self {
        Self {
            store: Arc::new(store),
            tokens: Arc::new(tokens),
            credentials: Arc::new(credentials),
            uploads: Arc::new(uploads),
        }
    }
}

impl<R: ContentRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tokens: Arc::clone(&self.tokens),
            credentials: Arc::clone(&self.credentials),
            uploads: Arc::clone(&self.uploads),
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Body of `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `PUT /api/stats`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsUpdate {
    /// The complete new list
    pub stats: Vec<Stat>,

    /// Replaced only when present
    #[serde(default)]
    pub stats_description: Option<String>,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "invalid_token")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent admin requests
    pub token: String,
    pub user: UserInfo,
}

/// The stats section after an update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub stats: Vec<Stat>,
    pub stats_description: String,
}

/// Confirmation with no payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Where an uploaded file can be fetched from.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub path: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Log an error by severity and turn it into the JSON error body.
///
/// - 5xx errors are logged at ERROR level (server errors)
/// - 404s are logged at DEBUG level, other 4xx at WARN
fn error_response(status: StatusCode, error_type: &str, message: String) -> Response {
    if status.is_server_error() {
        error!(
            error_type = error_type,
            status = status.as_u16(),
            "Server error: {}",
            message
        );
    } else if status == StatusCode::NOT_FOUND {
        debug!(
            error_type = error_type,
            status = status.as_u16(),
            "Resource not found: {}",
            message
        );
    } else {
        warn!(
            error_type = error_type,
            status = status.as_u16(),
            "Client error: {}",
            message
        );
    }

    let error_response = ErrorResponse::with_status(error_type, message, status);
    (status, Json(error_response)).into_response()
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ContentError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ContentError::Persistence(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error")
            }
        };
        error_response(status, error_type, self.to_string())
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            UploadError::MissingFile => (StatusCode::BAD_REQUEST, "missing_file"),
            UploadError::Multipart(_) => (StatusCode::BAD_REQUEST, "invalid_upload"),
            UploadError::TooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            UploadError::InvalidFileName(_) => (StatusCode::BAD_REQUEST, "invalid_file_name"),
            UploadError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upload_failed"),
        };
        error_response(status, error_type, self.to_string())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle login requests.
///
/// # Endpoint
///
/// `POST /api/login` with `{ "username": ..., "password": ... }`
///
/// # Response
///
/// - `200 OK`: `{ "token": ..., "user": { "id", "username", "email" } }`
/// - `401 Unauthorized`: unknown user or wrong password (same body for both)
pub async fn login_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let document = state.store.snapshot().await;
    let credentials = Arc::clone(&state.credentials);

    // bcrypt is deliberately slow; keep it off the async workers
    let user = tokio::task::spawn_blocking(move || {
        credentials
            .verify(&document.users, &request.username, &request.password)
            .map(UserInfo::from)
    })
    .await
    .map_err(|e| AuthError::Hashing(e.to_string()))??;

    let token = state.tokens.issue(&Identity {
        id: user.id,
        username: user.username.clone(),
    })?;
    info!(username = %user.username, "Admin logged in");

    Ok(Json(LoginResponse { token, user }))
}

/// Handle content requests.
///
/// # Endpoint
///
/// `GET /api/content`
///
/// Returns every public section. User records are never included.
pub async fn content_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
) -> Json<SiteContent> {
    Json(state.store.snapshot().await.content)
}

/// `PUT` on a singleton section: shallow-merge the body, return the merged section.
pub async fn update_singleton_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    Extension(singleton): Extension<Singleton>,
    session: AdminSession,
    Json(fields): Json<Fields>,
) -> Result<Json<Fields>, ContentError> {
    let merged = state
        .store
        .mutate(|document| Ok(document.content.merge_singleton(singleton, fields)))
        .await?;

    info!(section = singleton.key(), user = session.username(), "Updated section");
    Ok(Json(merged))
}

/// Handle stats updates.
///
/// # Endpoint
///
/// `PUT /api/stats` with `{ "stats": [...], "statsDescription": "..." }`
///
/// The list is replaced wholesale. `statsDescription` is optional and kept
/// as-is when omitted.
pub async fn update_stats_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    session: AdminSession,
    Json(update): Json<StatsUpdate>,
) -> Result<Json<StatsResponse>, ContentError> {
    let response = state
        .store
        .mutate(|document| {
            let content = &mut document.content;
            content.replace_stats(update.stats, update.stats_description);
            Ok(StatsResponse {
                stats: content.stats.clone(),
                stats_description: content.stats_description.clone(),
            })
        })
        .await?;

    info!(count = response.stats.len(), user = session.username(), "Replaced stats");
    Ok(Json(response))
}

/// `PUT` on a visibility map: replace it wholesale.
///
/// Breakpoint keys outside the fixed set are rejected by the JSON extractor
/// (422) before anything is written.
pub async fn update_visibility_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    Extension(area): Extension<VisibilityArea>,
    session: AdminSession,
    Json(visibility): Json<Visibility>,
) -> Result<Json<Visibility>, ContentError> {
    let visibility = state
        .store
        .mutate(|document| {
            document.content.replace_visibility(area, visibility);
            Ok(document.content.visibility(area).clone())
        })
        .await?;

    info!(section = area.key(), user = session.username(), "Replaced visibility");
    Ok(Json(visibility))
}

/// `GET` on a collection: every record in stored order.
pub async fn list_records_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    Extension(collection): Extension<Collection>,
) -> Json<Vec<Record>> {
    let document = state.store.snapshot().await;
    Json(document.content.records(collection).to_vec())
}

/// `POST` on a collection: append a record with a freshly allocated id.
///
/// Returns the new record, e.g. `{ "id": 1700000000000, "title": "X" }`.
pub async fn create_record_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    Extension(collection): Extension<Collection>,
    session: AdminSession,
    Json(fields): Json<Fields>,
) -> Result<Json<Record>, ContentError> {
    let record = state
        .store
        .mutate(|document| {
            Ok(document
                .content
                .create_record(collection, fields, unix_millis()))
        })
        .await?;

    info!(
        collection = collection.key(),
        id = record.id,
        user = session.username(),
        "Created record"
    );
    Ok(Json(record))
}

/// `PUT` on a record: shallow-merge the body into it.
///
/// # Response
///
/// - `200 OK`: the updated record
/// - `404 Not Found`: `{ "error": "not_found", "message": "Service not found", ... }`
pub async fn update_record_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    Extension(collection): Extension<Collection>,
    session: AdminSession,
    Path(id): Path<u64>,
    Json(fields): Json<Fields>,
) -> Result<Json<Record>, ContentError> {
    let record = state
        .store
        .mutate(|document| document.content.update_record(collection, id, fields))
        .await?;

    info!(
        collection = collection.key(),
        id = id,
        user = session.username(),
        "Updated record"
    );
    Ok(Json(record))
}

/// `DELETE` on a record. Succeeds whether or not the id existed.
pub async fn delete_record_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    Extension(collection): Extension<Collection>,
    session: AdminSession,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, ContentError> {
    let removed = state
        .store
        .mutate(|document| Ok(document.content.delete_record(collection, id)))
        .await?;

    if removed {
        info!(
            collection = collection.key(),
            id = id,
            user = session.username(),
            "Deleted record"
        );
    } else {
        debug!(collection = collection.key(), id = id, "Delete matched no record");
    }

    Ok(Json(MessageResponse {
        message: format!("{} deleted successfully", collection.label()),
    }))
}

/// Handle file uploads.
///
/// # Endpoint
///
/// `POST /api/upload` (multipart, file in the `file` field)
///
/// # Response
///
/// - `200 OK`: `{ "message": "File uploaded successfully", "path": "/uploads/<millis>-<name>" }`
/// - `400 Bad Request`: no `file` field, unreadable body, or unusable file name
/// - `413 Payload Too Large`: body over the configured limit
/// - `500 Internal Server Error`: the file could not be written
pub async fn upload_handler<R: ContentRepository>(
    State(state): State<AppState<R>>,
    session: AdminSession,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    let limit = state.uploads.max_bytes();
    let mut multipart = multipart.map_err(|e| UploadError::Multipart(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or(UploadError::MissingFile)?;
        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        let path = state.uploads.store(&data, &file_name).await?;
        info!(path = %path, user = session.username(), "File uploaded");

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            path,
        }));
    }

    Err(UploadError::MissingFile)
}

fn multipart_error(err: MultipartError, limit: usize) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge { limit }
    } else {
        UploadError::Multipart(err.body_text())
    }
}

// =============================================================================
// Tests
// =============================================================================
