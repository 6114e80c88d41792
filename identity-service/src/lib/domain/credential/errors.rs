use auth::AuthenticationError;
use auth::TokenError;
use thiserror::Error;

/// Error for SubjectId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubjectIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Failures reported by a credential store.
///
/// `NotFound` is a regular outcome of a lookup, distinct from the store
/// being unable to answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Credential not found")]
    NotFound,

    #[error("Credential already exists: {0}")]
    AlreadyExists(String),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for identity operations
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Token error: {0}")]
    Token(TokenError),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for IdentityError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Unauthenticated => IdentityError::Unauthenticated,
            TokenError::InvalidInput(message) => IdentityError::InvalidInput(message),
            TokenError::Internal(message) => IdentityError::Internal(message),
            other => IdentityError::Token(other),
        }
    }
}

impl From<AuthenticationError> for IdentityError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidInput(message) => IdentityError::InvalidInput(message),
            AuthenticationError::InvalidCredentials => IdentityError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => IdentityError::Internal(e.to_string()),
            AuthenticationError::TokenError(e) => IdentityError::from(e),
        }
    }
}
