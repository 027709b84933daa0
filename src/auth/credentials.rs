//! Password hashing and the login check.

use tracing::warn;

use crate::content::User;

use super::AuthError;

/// bcrypt cost used for stored password hashes.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

/// Hash a password with bcrypt at `cost`.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Checks username/password pairs against stored bcrypt hashes.
///
/// A login for an unknown username is verified against a decoy hash of the
/// same cost, so both failure paths do the same work and return the same
/// [`AuthError::InvalidCredentials`].
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    decoy_hash: String,
}

impl CredentialVerifier {
    /// Create a verifier whose decoy hash uses `cost` (match the stored hashes).
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        Ok(Self {
            decoy_hash: hash_password(DECOY_PASSWORD, cost)?,
        })
    }

    /// Find the user named `username` and check `password` against its hash.
    ///
    /// Blocks for one bcrypt verification; run it off the async executor.
    pub fn verify<'a>(
        &self,
        users: &'a [User],
        username: &str,
        password: &str,
    ) -> Result<&'a User, AuthError> {
        let user = users.iter().find(|user| user.username == username);
        let hash = user.map_or(self.decoy_hash.as_str(), |user| user.password_hash.as_str());

        let matches = match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(username = username, "Stored password hash is unusable: {}", e);
                false
            }
        };

        match user {
            Some(user) if matches => Ok(user),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
