use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::credential::errors::IdentityError;
use crate::credential::errors::SubjectIdError;
use crate::credential::errors::UsernameError;

/// Credential record kept by the credential store.
///
/// The password hash is written once at registration and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub subject_id: SubjectId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Subject unique identifier type
///
/// This is the identity embedded in issued session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubjectId(pub Uuid);

impl SubjectId {
    /// Generate a new random subject ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a subject ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SubjectIdError> {
        Uuid::parse_str(s)
            .map(SubjectId)
            .map_err(|e| SubjectIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Surrounding whitespace is removed; the remainder must be 1-64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty or only whitespace
    /// * `TooLong` - Username longer than 64 characters
    pub fn new(username: impl AsRef<str>) -> Result<Self, UsernameError> {
        let username = username.as_ref().trim();
        let length = username.chars().count();

        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Command to register a new credential.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: String,
}

impl RegisterCommand {
    /// Validate raw registration input.
    ///
    /// # Errors
    /// * `InvalidUsername` - Username fails validation
    /// * `InvalidInput` - Password is empty
    pub fn new(username: impl AsRef<str>, password: impl Into<String>) -> Result<Self, IdentityError> {
        let username = Username::new(username)?;
        let password = password.into();

        if password.is_empty() {
            return Err(IdentityError::InvalidInput(
                "password is required".to_string(),
            ));
        }

        Ok(Self { username, password })
    }
}

/// Command to log in with a username and password.
///
/// Left unvalidated so that a malformed username is answered exactly like an
/// unknown one.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Session obtained from a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub subject_id: SubjectId,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Public view of a credential, without the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub subject_id: SubjectId,
    pub username: Username,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredCredential> for Profile {
    fn from(credential: &StoredCredential) -> Self {
        Self {
            subject_id: credential.subject_id,
            username: credential.username.clone(),
            created_at: credential.created_at,
        }
    }
}
