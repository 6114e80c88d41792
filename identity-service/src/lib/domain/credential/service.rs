use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::RequestMetadata;
use auth::UserClaims;
use chrono::Utc;

use crate::credential::errors::IdentityError;
use crate::credential::errors::StoreError;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginSession;
use crate::credential::models::Profile;
use crate::credential::models::RegisterCommand;
use crate::credential::models::StoredCredential;
use crate::credential::models::SubjectId;
use crate::credential::models::Username;
use crate::credential::ports::CredentialStore;
use crate::credential::ports::IdentityServicePort;

/// Domain service implementation for identity operations.
///
/// Concrete implementation of IdentityServicePort with dependency injection.
pub struct IdentityService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> IdentityService<CS>
where
    CS: CredentialStore,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token handling
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> IdentityServicePort for IdentityService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Profile, IdentityError> {
        match self.store.find_by_name(&command.username).await {
            Ok(_) => {
                tracing::warn!(username = %command.username, "Username already taken");
                return Err(IdentityError::UsernameTaken(command.username.to_string()));
            }
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let credential = StoredCredential {
            subject_id: SubjectId::new(),
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self
            .store
            .create(credential)
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists(name) => IdentityError::UsernameTaken(name),
                other => IdentityError::Store(other),
            })?;

        tracing::info!(
            subject_id = %created.subject_id,
            username = %created.username,
            "Credential registered"
        );

        Ok(Profile::from(&created))
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginSession, IdentityError> {
        if command.username.trim().is_empty() {
            return Err(IdentityError::InvalidInput("name is required".to_string()));
        }

        if command.password.is_empty() {
            return Err(IdentityError::InvalidInput(
                "password is required".to_string(),
            ));
        }

        let Ok(username) = Username::new(&command.username) else {
            return Err(self.authenticator.reject_unknown(&command.password).into());
        };

        let credential = match self.store.find_by_name(&username).await {
            Ok(credential) => credential,
            Err(StoreError::NotFound) => {
                tracing::warn!(username = %username, "Login rejected");
                return Err(self.authenticator.reject_unknown(&command.password).into());
            }
            Err(e) => return Err(e.into()),
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &credential.password_hash,
                &credential.subject_id.to_string(),
            )
            .map_err(|e| {
                tracing::warn!(username = %username, error = %e, "Login rejected");
                IdentityError::from(e)
            })?;

        tracing::info!(subject_id = %credential.subject_id, "Login succeeded");

        Ok(LoginSession {
            subject_id: credential.subject_id,
            access_token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn authenticate(&self, metadata: &RequestMetadata) -> Result<UserClaims, IdentityError> {
        self.authenticator.validate_metadata(metadata).map_err(|e| {
            tracing::debug!(error = %e, "Request authentication failed");
            IdentityError::from(e)
        })
    }

    async fn current_user(&self, metadata: &RequestMetadata) -> Result<Profile, IdentityError> {
        let claims = self.authenticate(metadata).await?;

        let subject_id = SubjectId::from_string(claims.subject()).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not a subject id");
            IdentityError::Unauthenticated
        })?;

        match self.store.find_by_id(&subject_id).await {
            Ok(credential) => Ok(Profile::from(&credential)),
            Err(StoreError::NotFound) => Err(IdentityError::Unauthenticated),
            Err(e) => Err(e.into()),
        }
    }
}
