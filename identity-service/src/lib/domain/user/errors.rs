use auth::PasswordError;
use thiserror::Error;

use crate::domain::user::models::UserId;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),

    #[error("User id cannot be negative: {0}")]
    Negative(i64),
}

/// Precondition violated by caller-supplied input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("id cannot be empty")]
    UnassignedId,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

/// Failure reported by the identity store.
///
/// Absence is never an error: finders return `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Does not say which identifier collided.
    #[error("Username, email or phone number already exists")]
    Conflict,

    /// Same for unknown usernames and wrong passwords.
    #[error("Invalid credentials")]
    Authentication,

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Password hashing failed: {0}")]
    Hashing(PasswordError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for UserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UniqueViolation(_) => UserError::Conflict,
            RepositoryError::Database(message) => UserError::Storage(message),
        }
    }
}
