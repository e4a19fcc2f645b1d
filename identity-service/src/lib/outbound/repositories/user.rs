use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserIdentifiers;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::RepositoryError;

const USER_COLUMNS: &str =
    "id, name, username, email, phone_number, password, created_at, updated_at";

/// Row of the `users` table.
#[derive(Debug, FromRow)]
struct UserRecord {
    id: i64,
    name: String,
    username: String,
    email: Option<String>,
    phone_number: Option<String>,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: UserId(record.id),
            name: record.name,
            username: record.username,
            email: record.email,
            phone_number: record.phone_number,
            password_hash: record.password,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one_by(
        &self,
        column: &'static str,
        value: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1 LIMIT 1");

        let record = sqlx::query_as::<_, UserRecord>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(record.map(User::from))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let record = sqlx::query_as::<_, UserRecord>(&query)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(record.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one_by("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one_by("email", email).await
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<User>, RepositoryError> {
        self.find_one_by("phone_number", phone_number).await
    }

    async fn find_by_username_or_email_or_phone_number(
        &self,
        identifiers: &UserIdentifiers,
    ) -> Result<Option<User>, RepositoryError> {
        // NULL parameters never compare equal, so absent identifiers match nothing
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE username = $1 OR email = $2 OR phone_number = $3 \
             LIMIT 1"
        );

        let record = sqlx::query_as::<_, UserRecord>(&query)
            .bind(&identifiers.username)
            .bind(identifiers.email.as_deref())
            .bind(identifiers.phone_number.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(record.map(User::from))
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let query = format!(
            "INSERT INTO users (name, username, email, phone_number, password, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, now(), now()) \
             RETURNING {USER_COLUMNS}"
        );

        let record = sqlx::query_as::<_, UserRecord>(&query)
            .bind(&user.name)
            .bind(&user.username)
            .bind(user.email.as_deref())
            .bind(user.phone_number.as_deref())
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return RepositoryError::UniqueViolation(
                            db_err.constraint().unwrap_or("users").to_string(),
                        );
                    }
                }
                database_error(e)
            })?;

        Ok(record.into())
    }
}

fn database_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}
