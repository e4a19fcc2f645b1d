use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::LoginResult;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::errors::ValidationError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration, login and lookups.
///
/// Never retries: every collaborator failure is classified and returned.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity store implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Empty(field))
    } else {
        Ok(())
    }
}

fn validate_registration(command: &RegisterUserCommand) -> Result<(), ValidationError> {
    require_non_empty("name", &command.name)?;
    require_non_empty("username", &command.username)?;
    require_non_empty("password", &command.password)?;

    if let Some(email) = &command.email {
        email_address::EmailAddress::from_str(email)
            .map_err(|e| ValidationError::InvalidEmail(e.to_string()))?;
    }

    Ok(())
}

/// A lookup hit only counts when the record carries a persisted id.
fn is_taken(found: &Option<User>) -> bool {
    found.as_ref().is_some_and(|user| user.id.is_assigned())
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        validate_registration(&command)?;

        let existing = self
            .repository
            .find_by_username_or_email_or_phone_number(&command.identifiers())
            .await?;

        if is_taken(&existing) {
            tracing::info!(
                username = %command.username,
                "Registration rejected: identifier already in use"
            );
            return Err(UserError::Conflict);
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                UserError::Hashing(e)
            })?;

        let user = self
            .repository
            .insert(command.into_new_user(password_hash))
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, UserError> {
        require_non_empty("username", username)?;
        require_non_empty("password", password)?;

        let Some(user) = self.repository.find_by_username(username).await? else {
            tracing::warn!(username = %username, "Login rejected: unknown username");
            return Err(UserError::Authentication);
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id.as_i64())
            .map_err(|e| {
                match &e {
                    AuthenticationError::InvalidCredentials => {
                        tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
                    }
                    AuthenticationError::PasswordError(err) => {
                        tracing::error!(
                            user_id = %user.id,
                            error = %err,
                            "Stored password hash is unreadable"
                        );
                    }
                    AuthenticationError::JwtError(err) => {
                        tracing::error!(user_id = %user.id, error = %err, "Token issuance failed");
                    }
                }
                UserError::Authentication
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            user,
            token: result.access_token,
        })
    }

    async fn find_user(&self, id: UserId) -> Result<User, UserError> {
        if !id.is_assigned() {
            return Err(ValidationError::UnassignedId.into());
        }

        self.repository
            .find_by_id(id)
            .await?
            .filter(|user| user.id.is_assigned())
            .ok_or(UserError::NotFound(id))
    }

    async fn check_unique_by_username(&self, username: &str) -> Result<bool, UserError> {
        require_non_empty("username", username)?;

        let found = self.repository.find_by_username(username).await?;
        Ok(!is_taken(&found))
    }

    async fn check_unique_by_email(&self, email: &str) -> Result<bool, UserError> {
        require_non_empty("email", email)?;

        let found = self.repository.find_by_email(email).await?;
        Ok(!is_taken(&found))
    }

    async fn check_unique_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<bool, UserError> {
        require_non_empty("phone number", phone_number)?;

        let found = self.repository.find_by_phone_number(phone_number).await?;
        Ok(!is_taken(&found))
    }
}
