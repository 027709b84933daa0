//! Router configuration for the content API.
//!
//! # Route Structure
//!
//! ```text
//! /health                              - Health check (public)
//! /api/login                           - Login (public)
//! /api/content                         - Whole site content (public)
//! /api/{collection}                    - GET public, POST admin
//! /api/{collection}/{id}               - PUT/DELETE admin
//! /api/{singleton}                     - PUT admin
//! /api/stats                           - PUT admin
//! /api/{header,footer}-visibility      - PUT admin
//! /api/upload                          - POST admin (multipart)
//! {uploads prefix}/*                   - Uploaded files (public, static)
//! ```
//!
//! Admin routes check the bearer token in their handlers via
//! [`AdminSession`](super::auth::AdminSession).
//!
//! # Example
//!
//! ```ignore
//! use clinic_cms::server::{create_router, AppState, RouterConfig};
//!
//! let state = AppState::new(store, tokens, credentials, uploads);
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(state, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:4500").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Extension, Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    content_handler, create_record_handler, delete_record_handler, health_handler,
    list_records_handler, login_handler, update_record_handler, update_singleton_handler,
    update_stats_handler, update_visibility_handler, upload_handler, AppState,
};
use crate::content::{Collection, Singleton, VisibilityArea};
use crate::store::ContentRepository;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,

    /// Whether to serve the uploads directory under its public prefix
    pub serve_uploads: bool,
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Tracing is enabled
    /// - Uploaded files are served
    pub fn new() -> Self {
        Self {
            cors_origins: None, // Allow any origin by default
            enable_tracing: true,
            serve_uploads: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// Enable or disable serving uploaded files.
    pub fn with_serve_uploads(mut self, enabled: bool) -> Self {
        self.serve_uploads = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public read routes and login
/// - Admin write routes (bearer token checked per handler)
/// - Static serving of uploaded files
/// - CORS configuration
/// - Request tracing (optional)
pub fn create_router<R: ContentRepository>(state: AppState<R>, config: RouterConfig) -> Router {
    let mut api = Router::new()
        .route("/api/login", post(login_handler::<R>))
        .route("/api/content", get(content_handler::<R>))
        .route("/api/stats", put(update_stats_handler::<R>))
        .route(
            "/api/upload",
            post(upload_handler::<R>).layer(DefaultBodyLimit::max(state.uploads.max_bytes())),
        );

    for collection in Collection::ALL {
        api = api.merge(collection_routes::<R>(collection));
    }

    for singleton in Singleton::ALL {
        api = api.route(
            singleton.route(),
            put(update_singleton_handler::<R>).layer(Extension(singleton)),
        );
    }

    for area in [VisibilityArea::Header, VisibilityArea::Footer] {
        api = api.route(
            area.route(),
            put(update_visibility_handler::<R>).layer(Extension(area)),
        );
    }

    let mut router = api
        .route("/health", get(health_handler))
        .with_state(state.clone());

    if config.serve_uploads {
        router = router.nest_service(
            state.uploads.public_prefix(),
            ServeDir::new(state.uploads.dir()),
        );
    }

    let router = router.layer(build_cors_layer(&config));

    // Add tracing if enabled
    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// List/create on the collection path, update/delete on `{id}` below it.
fn collection_routes<R: ContentRepository>(collection: Collection) -> Router<AppState<R>> {
    let item_path = format!("{}/{{id}}", collection.route());

    Router::new()
        .route(
            collection.route(),
            get(list_records_handler::<R>)
                .post(create_record_handler::<R>)
                .layer(Extension(collection)),
        )
        .route(
            &item_path,
            put(update_record_handler::<R>)
                .delete(delete_record_handler::<R>)
                .layer(Extension(collection)),
        )
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            // Parse origins into HeaderValues
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
