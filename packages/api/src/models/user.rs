//! # User model
//!
//! [`User`] is the complete row from the `users` table and the only persisted
//! entity. It derives [`sqlx::FromRow`] so it can be loaded directly from queries:
//!
//! - `id`: primary key (`UUID v4`).
//! - `username` / `password_hash`: set for local accounts; the hash is an Argon2
//!   PHC string, never the plaintext.
//! - `google_id` / `github_id`: provider subject ids for OAuth accounts.
//! - `secrets`: the user's secrets in insertion order.
//! - `created_at` / `updated_at`: audit timestamps.
//!
//! Every row is reachable through at least one of `username`, `google_id` or
//! `github_id`; the table enforces this with a `CHECK` constraint.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Identity, ProviderKind};

/// Full user record from the store.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub github_id: Option<String>,
    pub secrets: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh local account.
    pub fn new_local(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: Some(username),
            password_hash: Some(password_hash),
            google_id: None,
            github_id: None,
            secrets: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A fresh account with only the provider subject id set.
    pub fn new_external(provider: ProviderKind, subject: String) -> Self {
        let now = Utc::now();
        let mut user = Self {
            id: Uuid::new_v4(),
            username: None,
            password_hash: None,
            google_id: None,
            github_id: None,
            secrets: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        *user.provider_id_mut(provider) = Some(subject);
        user
    }

    pub fn provider_id(&self, provider: ProviderKind) -> Option<&str> {
        match provider {
            ProviderKind::Google => self.google_id.as_deref(),
            ProviderKind::GitHub => self.github_id.as_deref(),
        }
    }

    fn provider_id_mut(&mut self, provider: ProviderKind) -> &mut Option<String> {
        match provider {
            ProviderKind::Google => &mut self.google_id,
            ProviderKind::GitHub => &mut self.github_id,
        }
    }

    /// Whether the record answers to the given identity.
    pub fn matches(&self, identity: &Identity) -> bool {
        match identity {
            Identity::Local { username } => self.username.as_deref() == Some(username.as_str()),
            Identity::External { provider, subject } => {
                self.provider_id(*provider) == Some(subject.as_str())
            }
        }
    }
}
