use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Identity token payload.
///
/// `exp - iat` always equals the validity window the token was issued with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject user id
    #[serde(rename = "id")]
    pub user_id: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims for a user, valid for `validity` starting at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiration falls outside the representable range
    pub fn new(
        user_id: i64,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at.checked_add_signed(validity).ok_or_else(|| {
            JwtError::EncodingFailed("token expiration is out of range".to_string())
        })?;

        Ok(Self {
            user_id,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }
}
