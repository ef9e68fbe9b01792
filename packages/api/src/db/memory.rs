//! In-process [`UserStore`] for tests and `database.in_memory` deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::UserStore;
use crate::error::{Error, Result};
use crate::models::{Identity, ProviderKind, User};

/// In-memory UserStore for testing and database-less runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.matches(identity)).cloned())
    }

    async fn find_or_create_external(
        &self,
        provider: ProviderKind,
        subject: &str,
    ) -> Result<User> {
        let identity = Identity::external(provider, subject);
        let mut users = self.users.lock().await;
        if let Some(user) = users.values().find(|u| u.matches(&identity)) {
            return Ok(user.clone());
        }
        let user = User::new_external(provider, subject.to_string());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn create_local(&self, username: &str, password_hash: &str) -> Result<User> {
        let identity = Identity::local(username);
        let mut users = self.users.lock().await;
        if users.values().any(|u| u.matches(&identity)) {
            return Err(Error::DuplicateUsername);
        }
        let user = User::new_local(username.to_string(), password_hash.to_string());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn push_secret(&self, id: Uuid, secret: &str) -> Result<User> {
        let mut users = self.users.lock().await;
        let user = users.get_mut(&id).ok_or(Error::NotFound)?;
        user.secrets.push(secret.to_string());
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn remove_secret(&self, id: Uuid, index: usize) -> Result<Option<String>> {
        let mut users = self.users.lock().await;
        let user = users.get_mut(&id).ok_or(Error::NotFound)?;
        if index >= user.secrets.len() {
            return Ok(None);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.secrets.remove(index)))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.lock().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_local_rejects_duplicates() {
        let store = MemoryUserStore::new();

        let alice = store.create_local("alice", "hash").await.unwrap();
        assert_eq!(alice.username.as_deref(), Some("alice"));

        let err = store.create_local("alice", "other").await.unwrap_err();
        assert!(matches!(err, Error::DuplicateUsername));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_or_create_external_is_idempotent() {
        let store = MemoryUserStore::new();

        let first = store
            .find_or_create_external(ProviderKind::Google, "g-1")
            .await
            .unwrap();
        let second = store
            .find_or_create_external(ProviderKind::Google, "g-1")
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.count().await.unwrap(), 1);

        // Same subject at a different provider is a different person
        let github = store
            .find_or_create_external(ProviderKind::GitHub, "g-1")
            .await
            .unwrap();
        assert_ne!(first.id, github.id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_find_or_create_yields_one_record() {
        let store = MemoryUserStore::new();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .find_or_create_external(ProviderKind::GitHub, "race")
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_identity_uses_single_field() {
        let store = MemoryUserStore::new();
        let local = store.create_local("42", "hash").await.unwrap();
        let github = store
            .find_or_create_external(ProviderKind::GitHub, "42")
            .await
            .unwrap();

        let found = store
            .find_by_identity(&Identity::local("42"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, local.id);

        let found = store
            .find_by_identity(&Identity::external(ProviderKind::GitHub, "42"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, github.id);

        assert!(store
            .find_by_identity(&Identity::external(ProviderKind::Google, "42"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_push_and_remove_secrets() {
        let store = MemoryUserStore::new();
        let user = store.create_local("bob", "hash").await.unwrap();

        store.push_secret(user.id, "one").await.unwrap();
        store.push_secret(user.id, "two").await.unwrap();
        let user = store.push_secret(user.id, "three").await.unwrap();
        assert_eq!(user.secrets, vec!["one", "two", "three"]);

        let removed = store.remove_secret(user.id, 1).await.unwrap();
        assert_eq!(removed.as_deref(), Some("two"));

        // Out of range leaves the list alone
        assert!(store.remove_secret(user.id, 2).await.unwrap().is_none());

        let user = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(user.secrets, vec!["one", "three"]);
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let store = MemoryUserStore::new();
        let err = store.push_secret(Uuid::new_v4(), "x").await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
        let err = store.remove_secret(Uuid::new_v4(), 0).await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }
}
