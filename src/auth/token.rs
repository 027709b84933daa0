//! Session tokens.
//!
//! Tokens are compact HS256 JSON Web Tokens. Claims carry the admin's `id`
//! and `username` plus `iat`/`exp` in Unix seconds. Sessions last
//! [`SESSION_TTL`]; there is no revocation, a token is good until it expires
//! or the secret changes.
//!
//! # Example
//!
//! ```rust
//! use clinic_cms::auth::{Identity, SessionTokens};
//!
//! let tokens = SessionTokens::new("a-long-server-secret");
//! let identity = Identity { id: 1, username: "admin".to_string() };
//!
//! let token = tokens.issue(&identity).unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.username, "admin");
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuthError, Identity};

/// How long a session token stays valid.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: u64,
    pub username: String,
    /// Issued at (Unix seconds)
    pub iat: u64,
    /// Expires at (Unix seconds)
    pub exp: u64,
}

/// Issues and verifies session tokens with one server-held secret.
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokens {
    pub fn new(secret_key: impl AsRef<[u8]>) -> Self {
        let secret_key = secret_key.as_ref();

        let mut validation = Validation::new(Algorithm::HS256);
        // Sessions end exactly at `exp`
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret_key),
            decoding_key: DecodingKey::from_secret(secret_key),
            validation,
        }
    }

    /// Issue a token for `identity`, valid for [`SESSION_TTL`] from now.
    pub fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        let issued_at = unix_seconds();
        self.issue_with_expiry(identity, issued_at, issued_at + SESSION_TTL.as_secs())
    }

    /// Issue a token with explicit timestamps.
    pub fn issue_with_expiry(
        &self,
        identity: &Identity,
        issued_at: u64,
        expires_at: u64,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            iat: issued_at,
            exp: expires_at,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(self.expired(token)),
            Err(e) => {
                debug!("Token rejected: {}", e);
                Err(AuthError::InvalidToken)
            }
        }
    }

    /// The signature already checked out; read `exp` back for the error.
    fn expired(&self, token: &str) -> AuthError {
        let mut validation = self.validation.clone();
        validation.validate_exp = false;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => AuthError::Expired {
                expired_at: data.claims.exp,
                current_time: unix_seconds(),
            },
            Err(_) => AuthError::InvalidToken,
        }
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================
