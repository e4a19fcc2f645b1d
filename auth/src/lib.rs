//! Authentication utilities library
//!
//! Provides the credential primitives of the identity service:
//! - Password hashing (Argon2id, self-describing PHC strings)
//! - Identity token issuance and validation (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashParams, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_params(HashParams::new(1024, 1, 1)).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::with_default_validity(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = issuer.issue(42).unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, HashParams, PasswordHasher, TokenIssuer};
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::with_params(HashParams::new(1024, 1, 1)).unwrap(),
//!     TokenIssuer::with_default_validity(b"secret_key_at_least_32_bytes_long!").unwrap(),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 1).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.user_id, 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenIssuer;
pub use password::HashParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
