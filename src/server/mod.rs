//! HTTP server layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │      GET /api/content   PUT /api/hero   POST /api/services      │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────────┐ │
//! │  │  handlers   │  │     auth     │  │        routes           │ │
//! │  │ (requests)  │  │ (bearer JWT) │  │  (router config)        │ │
//! │  └─────────────┘  └──────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::AdminSession;
pub use handlers::{
    content_handler, create_record_handler, delete_record_handler, health_handler,
    list_records_handler, login_handler, update_record_handler, update_singleton_handler,
    update_stats_handler, update_visibility_handler, upload_handler, AppState, ErrorResponse,
    HealthResponse, LoginRequest, LoginResponse, MessageResponse, StatsResponse, StatsUpdate,
    UploadResponse,
};
pub use routes::{create_router, RouterConfig};
