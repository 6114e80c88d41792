use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credential::errors::StoreError;
use crate::credential::models::StoredCredential;
use crate::credential::models::SubjectId;
use crate::credential::models::Username;
use crate::credential::ports::CredentialStore;

/// Credential store kept in process memory.
///
/// Usernames are unique; the username index and the record map are updated
/// under a single write lock.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Records>,
}

#[derive(Default)]
struct Records {
    by_id: HashMap<SubjectId, StoredCredential>,
    by_name: HashMap<Username, SubjectId>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_name(&self, username: &Username) -> Result<StoredCredential, StoreError> {
        let records = self.inner.read().await;

        records
            .by_name
            .get(username)
            .and_then(|id| records.by_id.get(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: &SubjectId) -> Result<StoredCredential, StoreError> {
        self.inner
            .read()
            .await
            .by_id
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, credential: StoredCredential) -> Result<StoredCredential, StoreError> {
        let mut records = self.inner.write().await;

        if records.by_name.contains_key(&credential.username) {
            return Err(StoreError::AlreadyExists(credential.username.to_string()));
        }
        if records.by_id.contains_key(&credential.subject_id) {
            return Err(StoreError::AlreadyExists(credential.subject_id.to_string()));
        }

        records
            .by_name
            .insert(credential.username.clone(), credential.subject_id);
        records
            .by_id
            .insert(credential.subject_id, credential.clone());

        Ok(credential)
    }
}
