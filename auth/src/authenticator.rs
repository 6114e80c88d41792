use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::RequestMetadata;
use crate::token::SecretKey;
use crate::token::TokenError;
use crate::token::TokenManager;
use crate::token::UserClaims;

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and session token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_manager: TokenManager,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,

    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with default password hashing costs.
    ///
    /// # Arguments
    /// * `secret` - Key for token signing
    /// * `token_duration` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `InvalidInput` - Token duration is not positive
    pub fn new(secret: &SecretKey, token_duration: Duration) -> Result<Self, TokenError> {
        Ok(Self::from_parts(
            PasswordHasher::new(),
            TokenManager::new(secret, token_duration)?,
        ))
    }

    /// Assemble an authenticator from already configured components.
    pub fn from_parts(password_hasher: PasswordHasher, token_manager: TokenManager) -> Self {
        Self {
            password_hasher,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.token_manager
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, AuthenticationError> {
        if password.is_empty() {
            return Err(AuthenticationError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }

        Ok(self.password_hasher.hash(password)?)
    }

    /// Verify credentials and issue a session token.
    ///
    /// A stored hash that cannot be parsed is reported as
    /// `InvalidCredentials`, the same as a wrong password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity to embed in the token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let issued = self.token_manager.issue(subject)?;

        Ok(AuthenticationResult {
            access_token: issued.access_token,
            expires_at: issued.claims.expires_at,
        })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Performs a decoy password verification first, so the rejection takes
    /// as long as a wrong password against a real account.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_absent(password);
        AuthenticationError::InvalidCredentials
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `TokenError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<UserClaims, TokenError> {
        self.token_manager.verify(token)
    }

    /// Validate the session token carried in request metadata.
    ///
    /// # Errors
    /// * `Unauthenticated` - Authorization metadata is missing or empty
    /// * `TokenError` - Token validation or decoding failed
    pub fn validate_metadata(&self, metadata: &RequestMetadata) -> Result<UserClaims, TokenError> {
        self.token_manager.verify_presented(metadata)
    }
}
