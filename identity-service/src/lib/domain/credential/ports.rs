use async_trait::async_trait;
use auth::RequestMetadata;
use auth::UserClaims;

use crate::credential::errors::IdentityError;
use crate::credential::errors::StoreError;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginSession;
use crate::credential::models::Profile;
use crate::credential::models::RegisterCommand;
use crate::credential::models::StoredCredential;
use crate::credential::models::SubjectId;
use crate::credential::models::Username;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new credential.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Profile of the registered subject
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty
    /// * `UsernameTaken` - Username is already registered
    /// * `Store` - Credential store failed
    async fn register(&self, command: RegisterCommand) -> Result<Profile, IdentityError>;

    /// Check credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    ///
    /// # Returns
    /// Session with signed access token
    ///
    /// # Errors
    /// * `InvalidInput` - Username or password is empty
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Store` - Credential store failed
    async fn login(&self, command: LoginCommand) -> Result<LoginSession, IdentityError>;

    /// Verify the session token presented in request metadata.
    ///
    /// # Returns
    /// Claims of the verified token
    ///
    /// # Errors
    /// * `Unauthenticated` - No token was presented
    /// * `Token` - Token is invalid, expired or uses another algorithm
    async fn authenticate(&self, metadata: &RequestMetadata) -> Result<UserClaims, IdentityError>;

    /// Resolve the profile of the subject behind the presented token.
    ///
    /// # Errors
    /// * `Unauthenticated` - No token was presented, or its subject is unknown
    /// * `Token` - Token is invalid, expired or uses another algorithm
    /// * `Store` - Credential store failed
    async fn current_user(&self, metadata: &RequestMetadata) -> Result<Profile, IdentityError>;
}

/// Persistence operations for stored credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a credential by username.
    ///
    /// # Errors
    /// * `NotFound` - No credential with this username
    /// * `Unavailable` - Store operation failed
    async fn find_by_name(&self, username: &Username) -> Result<StoredCredential, StoreError>;

    /// Retrieve a credential by subject identifier.
    ///
    /// # Errors
    /// * `NotFound` - No credential with this identifier
    /// * `Unavailable` - Store operation failed
    async fn find_by_id(&self, id: &SubjectId) -> Result<StoredCredential, StoreError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `AlreadyExists` - Username is already taken
    /// * `Unavailable` - Store operation failed
    async fn create(&self, credential: StoredCredential) -> Result<StoredCredential, StoreError>;
}
