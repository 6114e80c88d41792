use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::RequestMetadata;
use auth::SecretKey;
use auth::TokenManager;
use chrono::Duration;
use identity_service::credential::service::IdentityService;
use identity_service::repositories::InMemoryCredentialStore;

pub const TEST_SECRET: &str = "test-secret-key-for-token-signing-at-least-32-bytes";

/// Test application wired against the in-memory credential store
pub struct TestApp {
    pub service: IdentityService<InMemoryCredentialStore>,
    pub store: Arc<InMemoryCredentialStore>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_secret(TEST_SECRET)
    }

    pub fn with_secret(secret: &str) -> Self {
        let secret = SecretKey::new(secret).expect("Failed to build secret key");

        // Cheap hashing parameters keep the suite fast.
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher");
        let manager =
            TokenManager::new(&secret, Duration::hours(1)).expect("Failed to build token manager");

        let authenticator = Arc::new(Authenticator::from_parts(hasher, manager));
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = IdentityService::new(Arc::clone(&store), Arc::clone(&authenticator));

        Self {
            service,
            store,
            authenticator,
        }
    }
}

pub fn bearer(token: &str) -> RequestMetadata {
    RequestMetadata::new().with("Authorization", format!("Bearer {}", token))
}
