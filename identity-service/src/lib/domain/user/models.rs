use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a persisted account. The password hash is never serialized and
/// never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// User identifier assigned by storage.
///
/// `UserId::UNASSIGNED` (zero) marks a user that was never persisted and is
/// also what an empty lookup result carries. It is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub const UNASSIGNED: UserId = UserId(0);

    /// Whether this id refers to a persisted user.
    pub fn is_assigned(&self) -> bool {
        self.0 > 0
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| UserIdError::InvalidFormat(s.to_string()))?;

        if value < 0 {
            return Err(UserIdError::Negative(value));
        }

        Ok(UserId(value))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new account.
///
/// Carries the plaintext password; it only lives until the service has
/// hashed it.
#[derive(Clone)]
pub struct RegisterUserCommand {
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: String,
}

impl RegisterUserCommand {
    /// Construct a registration command.
    ///
    /// Empty email or phone number strings are treated as absent.
    pub fn new(
        name: String,
        username: String,
        email: Option<String>,
        phone_number: Option<String>,
        password: String,
    ) -> Self {
        Self {
            name,
            username,
            email: email.filter(|value| !value.is_empty()),
            phone_number: phone_number.filter(|value| !value.is_empty()),
            password,
        }
    }

    /// The identifiers that must be unique across all accounts.
    pub fn identifiers(&self) -> UserIdentifiers {
        UserIdentifiers {
            username: self.username.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    /// Replace the plaintext password by its hash, consuming the command.
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            name: self.name,
            username: self.username,
            email: self.email,
            phone_number: self.phone_number,
            password_hash,
        }
    }
}

impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Username, email and phone number of a candidate account.
///
/// Absent optional identifiers never match anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentifiers {
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// A user ready to be persisted. Storage assigns id and timestamps.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Authenticated user paired with a freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: UserId(5),
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            phone_number: None,
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$ZGlnZXN0".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_serialization_strips_password() {
        let json = serde_json::to_value(user()).unwrap();

        assert_eq!(json["id"], 5);
        assert_eq!(json["username"], "alice");
        assert!(json["phone_number"].is_null());
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_login_result_serialization_strips_password() {
        let result = LoginResult {
            user: user(),
            token: "abc.def.ghi".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("abc.def.ghi"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", user());
        assert!(!rendered.contains("argon2"));
        assert!(rendered.contains("<redacted>"));

        let command = RegisterUserCommand::new(
            "A".to_string(),
            "a1".to_string(),
            None,
            None,
            "pw123".to_string(),
        );
        assert!(!format!("{:?}", command).contains("pw123"));
    }

    #[test]
    fn test_command_normalizes_empty_identifiers() {
        let command = RegisterUserCommand::new(
            "A".to_string(),
            "a1".to_string(),
            Some(String::new()),
            Some("+62811".to_string()),
            "pw123".to_string(),
        );

        assert_eq!(command.email, None);
        assert_eq!(command.phone_number, Some("+62811".to_string()));
    }

    #[test]
    fn test_into_new_user_replaces_password() {
        let command = RegisterUserCommand::new(
            "A".to_string(),
            "a1".to_string(),
            None,
            None,
            "pw123".to_string(),
        );

        let new_user = command.into_new_user("hashed".to_string());
        assert_eq!(new_user.password_hash, "hashed");
        assert_eq!(new_user.username, "a1");
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!("42".parse::<UserId>(), Ok(UserId(42)));
        assert_eq!("0".parse::<UserId>(), Ok(UserId::UNASSIGNED));
        assert!(matches!(
            "abc".parse::<UserId>(),
            Err(UserIdError::InvalidFormat(_))
        ));
        assert_eq!("-1".parse::<UserId>(), Err(UserIdError::Negative(-1)));
    }

    #[test]
    fn test_unassigned_id() {
        assert!(!UserId::UNASSIGNED.is_assigned());
        assert!(UserId(1).is_assigned());
    }
}
