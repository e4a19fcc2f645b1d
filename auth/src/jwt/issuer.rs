use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::TokenClaims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Issues and verifies identity tokens for persisted users.
///
/// Holds the process-wide signing secret; it is read-only after construction
/// and safe to share between concurrent requests.
pub struct TokenIssuer {
    handler: JwtHandler,
    validity: Duration,
}

impl TokenIssuer {
    pub const DEFAULT_VALIDITY_HOURS: i64 = 1200;

    /// Create an issuer signing with `secret`.
    ///
    /// # Errors
    /// * `MissingSecret` - `secret` is empty
    /// * `InvalidValidity` - `validity` is zero, negative, or too large to
    ///   compute an expiration from the current time
    pub fn new(secret: &[u8], validity: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }
        if validity <= Duration::zero() || Utc::now().checked_add_signed(validity).is_none() {
            return Err(JwtError::InvalidValidity);
        }

        Ok(Self {
            handler: JwtHandler::new(secret),
            validity,
        })
    }

    /// Create an issuer with the default validity window.
    pub fn with_default_validity(secret: &[u8]) -> Result<Self, JwtError> {
        Self::new(secret, Duration::hours(Self::DEFAULT_VALIDITY_HOURS))
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a signed token for `user_id`.
    ///
    /// # Errors
    /// * `InvalidSubject` - `user_id` is not a persisted id (zero or negative)
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, user_id: i64) -> Result<String, JwtError> {
        self.issue_at(user_id, Utc::now())
    }

    fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        if user_id <= 0 {
            return Err(JwtError::InvalidSubject);
        }

        let claims = TokenClaims::new(user_id, issued_at, self.validity)?;
        self.handler.encode(&claims)
    }

    /// Verify signature, structure and expiry, returning the embedded claims.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` has passed
    /// * `InvalidToken` - Bad signature, malformed token, or no subject
    pub fn verify(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let claims: TokenClaims = self.handler.decode(token)?;

        if claims.user_id <= 0 {
            return Err(JwtError::InvalidToken("token has no subject".to_string()));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::with_default_validity(SECRET).unwrap();

        let token = issuer.issue(42).expect("Failed to issue token");
        let claims = issuer.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.user_id, 42);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 1200 * 60 * 60);
    }

    #[test]
    fn test_issue_rejects_unassigned_id() {
        let issuer = TokenIssuer::with_default_validity(SECRET).unwrap();

        assert_eq!(issuer.issue(0), Err(JwtError::InvalidSubject));
        assert_eq!(issuer.issue(-3), Err(JwtError::InvalidSubject));
    }

    #[test]
    fn test_custom_validity() {
        let issuer = TokenIssuer::new(SECRET, Duration::minutes(15)).unwrap();

        let claims = issuer.verify(&issuer.issue(1).unwrap()).unwrap();
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_verify_expired_token() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1)).unwrap();

        let token = issuer
            .issue_at(42, Utc::now() - Duration::hours(2))
            .unwrap();

        assert_eq!(issuer.verify(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_verify_token_from_other_secret() {
        let issuer = TokenIssuer::with_default_validity(SECRET).unwrap();
        let other =
            TokenIssuer::with_default_validity(b"another_secret_at_least_32_bytes!!").unwrap();

        let token = other.issue(42).unwrap();

        assert!(matches!(
            issuer.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_garbage() {
        let issuer = TokenIssuer::with_default_validity(SECRET).unwrap();

        assert!(matches!(
            issuer.verify("abc.def.ghi"),
            Err(JwtError::InvalidToken(_))
        ));
        assert!(matches!(issuer.verify(""), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_rejects_zero_subject() {
        let issuer = TokenIssuer::with_default_validity(SECRET).unwrap();
        let forged = issuer
            .handler
            .encode(&TokenClaims::new(0, Utc::now(), Duration::hours(1)).unwrap())
            .unwrap();

        assert!(matches!(
            issuer.verify(&forged),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_missing_secret() {
        assert!(matches!(
            TokenIssuer::with_default_validity(b""),
            Err(JwtError::MissingSecret)
        ));
    }

    #[test]
    fn test_non_positive_validity() {
        assert!(matches!(
            TokenIssuer::new(SECRET, Duration::zero()),
            Err(JwtError::InvalidValidity)
        ));
    }

    #[test]
    fn test_unrepresentable_validity() {
        assert!(matches!(
            TokenIssuer::new(SECRET, Duration::MAX),
            Err(JwtError::InvalidValidity)
        ));
        assert!(matches!(
            TokenIssuer::new(SECRET, Duration::days(200_000_000)),
            Err(JwtError::InvalidValidity)
        ));
    }

    #[test]
    fn test_issue_near_range_limit_fails_without_panic() {
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1)).unwrap();

        assert!(matches!(
            issuer.issue_at(1, DateTime::<Utc>::MAX_UTC),
            Err(JwtError::EncodingFailed(_))
        ));
    }
}
