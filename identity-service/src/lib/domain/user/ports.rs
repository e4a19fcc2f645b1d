use async_trait::async_trait;

use crate::domain::user::models::LoginResult;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserIdentifiers;
use crate::user::errors::RepositoryError;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Name, username, optional email/phone and plaintext password
    ///
    /// # Returns
    /// Persisted user
    ///
    /// # Errors
    /// * `Validation` - Name, username or password empty, or malformed email
    /// * `Conflict` - Username, email or phone number already taken
    /// * `Hashing` - Password hashing failed
    /// * `Storage` - Identity store failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Authenticate with username and password and issue a bearer token.
    ///
    /// # Errors
    /// * `Validation` - Username or password empty
    /// * `Authentication` - Unknown username or wrong password
    /// * `Storage` - Identity store failed
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `Validation` - `id` is the unassigned sentinel
    /// * `NotFound` - User does not exist
    /// * `Storage` - Identity store failed
    async fn find_user(&self, id: UserId) -> Result<User, UserError>;

    /// Whether no account uses `username`.
    ///
    /// # Errors
    /// * `Validation` - `username` empty
    /// * `Storage` - Identity store failed
    async fn check_unique_by_username(&self, username: &str) -> Result<bool, UserError>;

    /// Whether no account uses `email`.
    async fn check_unique_by_email(&self, email: &str) -> Result<bool, UserError>;

    /// Whether no account uses `phone_number`.
    async fn check_unique_by_phone_number(&self, phone_number: &str)
        -> Result<bool, UserError>;
}

/// Identity store: persistence operations for user accounts.
///
/// Finders return `Ok(None)` when nothing matches; `Err` always means the
/// store itself failed. Dropping a returned future cancels the operation.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<User>, RepositoryError>;

    /// Retrieve any user matching the username, the email or the phone number.
    ///
    /// Absent optional identifiers match nothing.
    async fn find_by_username_or_email_or_phone_number(
        &self,
        identifiers: &UserIdentifiers,
    ) -> Result<Option<User>, RepositoryError>;

    /// Persist a new user, assigning id and timestamps.
    ///
    /// # Errors
    /// * `UniqueViolation` - An identifier was taken concurrently
    /// * `Database` - Database operation failed
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
}
