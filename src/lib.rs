//! # Clinic CMS
//!
//! Content API for a clinic website.
//!
//! The whole site lives in one JSON document: hero copy, stats, services,
//! doctors, reviews, FAQs, contact details, page copy, site settings and
//! per-breakpoint header/footer visibility. Anyone can read it; a logged-in
//! admin edits it section by section and uploads images.
//!
//! ## Features
//!
//! - **One document**: every edit is an atomic load-modify-save of a single JSON file
//! - **Section semantics**: singletons merge, collections are CRUD by id, stats and
//!   visibility maps are replaced wholesale
//! - **Seeded defaults**: a missing file or a missing section falls back to the seeded content
//! - **Authentication**: bcrypt-hashed admin passwords and 24-hour HS256 session tokens
//! - **Uploads**: multipart image uploads served back as static files
//!
//! ## Architecture
//!
//! - [`content`] - Document model, seeded defaults, section edit operations
//! - [`store`] - Repository trait, JSON file and in-memory repositories, the content store
//! - [`auth`] - Password hashing, login check, session tokens
//! - [`upload`] - Upload sink
//! - [`server`] - Axum handlers and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use clinic_cms::{
//!     create_router, hash_password, AppState, ContentStore, CredentialVerifier, Document,
//!     JsonFileRepository, RouterConfig, SessionTokens, UploadSink,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let hash = hash_password("admin123", 10).unwrap();
//!     let store = ContentStore::new(JsonFileRepository::new("data.json"), Document::seeded(hash));
//!     store.initialize().await.unwrap();
//!
//!     let state = AppState::new(
//!         store,
//!         SessionTokens::new("a-long-server-secret"),
//!         CredentialVerifier::new(10).unwrap(),
//!         UploadSink::new("uploads", "/uploads"),
//!     );
//!     let router = create_router(state, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:4500").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod store;
pub mod upload;

// Re-export commonly used types
pub use auth::{
    hash_password, AuthError, Claims, CredentialVerifier, Identity, SessionTokens, SESSION_TTL,
};
pub use config::{CheckConfig, Cli, Command, HashPasswordConfig, ServeConfig};
pub use content::{
    Breakpoint, Collection, Document, Fields, Record, Singleton, SiteContent, Stat, User,
    UserInfo, Visibility, VisibilityArea,
};
pub use error::{ContentError, StoreError, UploadError};
pub use server::{create_router, AdminSession, AppState, ErrorResponse, RouterConfig};
pub use store::{
    ContentRepository, ContentStore, JsonFileRepository, MemoryRepository, PersistencePolicy,
};
pub use upload::UploadSink;
