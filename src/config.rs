//! Configuration management for the clinic CMS.
//!
//! This module provides the CLI and configuration types:
//! - Command-line arguments via clap
//! - Environment variables with `CMS_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Commands
//!
//! - `serve` - Run the HTTP server
//! - `hash-password` - Print a bcrypt hash for a user record
//! - `check` - Load a data file and summarize it
//!
//! # Environment Variables
//!
//! - `CMS_HOST` - Server bind address (default: 0.0.0.0)
//! - `CMS_PORT` - Server port (default: 4500)
//! - `CMS_DATA_PATH` - Content document path (default: data.json)
//! - `CMS_UPLOADS_DIR` - Directory uploaded files are written to (default: uploads)
//! - `CMS_UPLOADS_PREFIX` - URL prefix uploads are served under (default: /uploads)
//! - `CMS_JWT_SECRET` - Session token signing secret (required)
//! - `CMS_ADMIN_PASSWORD` - Password of the seeded admin (default: admin123)
//! - `CMS_BCRYPT_COST` - bcrypt cost for password hashes (default: 10)
//! - `CMS_MAX_UPLOAD_BYTES` - Largest accepted upload body (default: 10 MiB)
//! - `CMS_LENIENT_PERSISTENCE` - Report success even when saving fails
//! - `CMS_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::auth::DEFAULT_BCRYPT_COST;
use crate::content::defaults::DEFAULT_ADMIN_PASSWORD;
use crate::store::PersistencePolicy;
use crate::upload::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOADS_DIR, DEFAULT_UPLOADS_PREFIX};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 4500;

/// Default content document path.
pub const DEFAULT_DATA_PATH: &str = "data.json";

/// Shortest accepted session signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 16;

/// bcrypt cost bounds accepted by the hasher.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Clinic CMS - content API for a clinic website.
///
/// Serves the site's content document, lets an authenticated admin edit it,
/// and stores uploaded images.
#[derive(Parser, Debug, Clone)]
#[command(name = "clinic-cms")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeConfig),

    /// Print a bcrypt hash of a password
    HashPassword(HashPasswordConfig),

    /// Load a content document and print a summary of its sections
    Check(CheckConfig),
}

/// Options for `serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "CMS_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "CMS_PORT")]
    pub port: u16,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Path of the JSON content document. Seeded with defaults if missing.
    #[arg(long, default_value = DEFAULT_DATA_PATH, env = "CMS_DATA_PATH")]
    pub data_path: PathBuf,

    /// Directory uploaded files are written to.
    #[arg(long, default_value = DEFAULT_UPLOADS_DIR, env = "CMS_UPLOADS_DIR")]
    pub uploads_dir: PathBuf,

    /// URL prefix uploaded files are served under.
    #[arg(long, default_value = DEFAULT_UPLOADS_PREFIX, env = "CMS_UPLOADS_PREFIX")]
    pub uploads_prefix: String,

    /// Largest accepted upload request body, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "CMS_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,

    /// Fail edit requests with 500 when the document cannot be saved.
    ///
    /// By default a failed save is logged and the request still succeeds.
    #[arg(long, default_value_t = false, env = "CMS_STRICT_PERSISTENCE")]
    pub strict_persistence: bool,

    /// Do not serve the uploads directory (e.g. when a reverse proxy does).
    #[arg(long, default_value_t = false, env = "CMS_NO_SERVE_UPLOADS")]
    pub no_serve_uploads: bool,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Secret used to sign session tokens.
    #[arg(long, env = "CMS_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Password given to the admin account when the document is first seeded.
    #[arg(
        long,
        default_value = DEFAULT_ADMIN_PASSWORD,
        env = "CMS_ADMIN_PASSWORD",
        hide_env_values = true
    )]
    pub admin_password: String,

    /// bcrypt cost for the seeded admin hash and the login decoy hash.
    #[arg(long, default_value_t = DEFAULT_BCRYPT_COST, env = "CMS_BCRYPT_COST")]
    pub bcrypt_cost: u32,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "CMS_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(format!(
                "JWT secret must be at least {} bytes. Set --jwt-secret or CMS_JWT_SECRET",
                MIN_SECRET_LEN
            ));
        }

        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        validate_cost(self.bcrypt_cost)?;

        if self.admin_password.is_empty() {
            return Err("admin password must not be empty".to_string());
        }

        if !self.uploads_prefix.starts_with('/') || self.uploads_prefix.trim_matches('/').is_empty()
        {
            return Err(format!(
                "uploads prefix must start with '/' and name a path, got {:?}",
                self.uploads_prefix
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn persistence_policy(&self) -> PersistencePolicy {
        if self.strict_persistence {
            PersistencePolicy::Strict
        } else {
            PersistencePolicy::Lenient
        }
    }
}

/// Options for `hash-password`.
#[derive(Args, Debug, Clone)]
pub struct HashPasswordConfig {
    /// Password to hash.
    pub password: String,

    /// bcrypt cost.
    #[arg(long, default_value_t = DEFAULT_BCRYPT_COST)]
    pub cost: u32,
}

impl HashPasswordConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        validate_cost(self.cost)
    }
}

/// Options for `check`.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// Path of the JSON content document.
    #[arg(long, default_value = DEFAULT_DATA_PATH, env = "CMS_DATA_PATH")]
    pub data_path: PathBuf,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn validate_cost(cost: u32) -> Result<(), String> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(format!(
            "bcrypt cost must be between {} and {}, got {}",
            MIN_BCRYPT_COST, MAX_BCRYPT_COST, cost
        ));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
