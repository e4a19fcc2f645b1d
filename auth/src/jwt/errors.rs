use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Cannot issue a token for an unassigned user id")]
    InvalidSubject,

    #[error("Signing secret is missing")]
    MissingSecret,

    #[error("Token validity must be positive and representable")]
    InvalidValidity,
}
