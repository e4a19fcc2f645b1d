use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashParams;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Utc;
use identity_service::domain::user::errors::RepositoryError;
use identity_service::domain::user::models::NewUser;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::models::UserIdentifiers;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory identity store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap hashing parameters keep the suite fast
        let password_hasher = PasswordHasher::with_params(HashParams::new(1024, 1, 1))
            .expect("Failed to create password hasher");
        let token_issuer = TokenIssuer::with_default_validity(TEST_SECRET)
            .expect("Failed to create token issuer");
        let authenticator = Arc::new(Authenticator::new(password_hasher, token_issuer));

        let user_repo = Arc::new(InMemoryUserRepository::default());
        let user_service = Arc::new(UserService::new(user_repo, Arc::clone(&authenticator)));

        let router = create_router(
            user_service,
            Arc::clone(&authenticator),
            Duration::from_secs(30),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }
}

/// Identity store backed by a vector, enforcing the same uniqueness rules as
/// the `users` table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    fn find_first(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| predicate(user))
            .cloned()
    }
}

fn matches_identifiers(user: &User, identifiers: &UserIdentifiers) -> bool {
    let same = |stored: &Option<String>, wanted: &Option<String>| match (stored, wanted) {
        (Some(stored), Some(wanted)) => stored == wanted,
        _ => false,
    };

    user.username == identifiers.username
        || same(&user.email, &identifiers.email)
        || same(&user.phone_number, &identifiers.phone_number)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.id == id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.username == username))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.email.as_deref() == Some(email)))
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| user.phone_number.as_deref() == Some(phone_number)))
    }

    async fn find_by_username_or_email_or_phone_number(
        &self,
        identifiers: &UserIdentifiers,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self.find_first(|user| matches_identifiers(user, identifiers)))
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();

        let identifiers = UserIdentifiers {
            username: user.username.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
        };
        if users
            .iter()
            .any(|existing| matches_identifiers(existing, &identifiers))
        {
            return Err(RepositoryError::UniqueViolation("users".to_string()));
        }

        let now = Utc::now();
        let stored = User {
            id: UserId(users.len() as i64 + 1),
            name: user.name,
            username: user.username,
            email: user.email,
            phone_number: user.phone_number,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(stored.clone());

        Ok(stored)
    }
}
