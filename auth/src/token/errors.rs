use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token uses an unsupported signing algorithm")]
    UnsupportedAlgorithm,

    #[error("Missing or empty authorization metadata")]
    Unauthenticated,

    #[error("Token operation failed: {0}")]
    Internal(String),
}
