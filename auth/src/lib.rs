//! Credential authentication kernel
//!
//! Issues and verifies identity credentials for user authentication:
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (HS256 JWT)
//! - Extraction of presented tokens from request metadata
//! - Authentication coordination
//!
//! Persistence and transport stay outside this crate. Services keep user records
//! in their own credential store and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SecretKey, TokenManager};
//! use chrono::Duration;
//!
//! let secret = SecretKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let manager = TokenManager::new(&secret, Duration::hours(1)).unwrap();
//! let issued = manager.issue("user123").unwrap();
//! let claims = manager.verify(&issued.access_token).unwrap();
//! assert_eq!(claims.subject(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, RequestMetadata, SecretKey};
//! use chrono::Duration;
//!
//! let secret = SecretKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret, Duration::hours(1)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Authenticated request: extract and validate token
//! let metadata = RequestMetadata::new()
//!     .with("Authorization", format!("Bearer {}", result.access_token));
//! let claims = auth.validate_metadata(&metadata).unwrap();
//! assert_eq!(claims.subject(), "user123");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::extract_presented_token;
pub use token::IssuedToken;
pub use token::RequestMetadata;
pub use token::SecretKey;
pub use token::TokenError;
pub use token::TokenManager;
pub use token::UserClaims;
