//! Admin identity and sessions.
//!
//! - [`credentials`]: bcrypt password hashes and the login check
//! - [`token`]: signed, time-limited session tokens (HS256 JWT)
//!
//! Read endpoints are public; every mutating endpoint requires a session
//! token issued by a successful login.

pub mod credentials;
pub mod token;

use serde::{Deserialize, Serialize};

pub use credentials::{hash_password, CredentialVerifier, DEFAULT_BCRYPT_COST};
pub use token::{Claims, SessionTokens, SESSION_TTL};

/// Authentication error types.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No bearer token on the request
    MissingToken,

    /// Token is malformed or its signature does not verify
    InvalidToken,

    /// Token signature is valid but the session has expired
    Expired {
        /// When the session expired (Unix seconds)
        expired_at: u64,
        /// Current time (Unix seconds)
        current_time: u64,
    },

    /// Unknown username or wrong password (deliberately indistinguishable)
    InvalidCredentials,

    /// Password hashing or verification could not run
    Hashing(String),

    /// A session token could not be signed
    Signing(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Access denied"),
            AuthError::InvalidToken => write!(f, "Invalid token"),
            AuthError::Expired {
                expired_at,
                current_time,
            } => write!(
                f,
                "Token expired at {} (current time: {})",
                expired_at, current_time
            ),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::Hashing(message) => write!(f, "Password hashing failed: {}", message),
            AuthError::Signing(message) => write!(f, "Token signing failed: {}", message),
        }
    }
}

impl std::error::Error for AuthError {}

/// The authenticated admin behind a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub username: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
        }
    }
}
