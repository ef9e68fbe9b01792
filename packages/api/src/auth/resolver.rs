//! # Identity Resolver
//!
//! Maps a completed login, local or OAuth, to exactly one persisted [`User`], and
//! maps an authenticated session back to that user on later requests.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::password::{hash_password, verify_password};
use super::session::SessionUser;
use crate::db::UserStore;
use crate::error::{Error, Result};
use crate::models::{Identity, ProviderKind, User};

const MAX_USERNAME_CHARS: usize = 64;
const MAX_PASSWORD_BYTES: usize = 1024;

/// What a finished login handshake hands the resolver.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Local registration.
    Local { username: String, password: String },
    /// A provider subject id from a completed OAuth exchange.
    External { provider: ProviderKind, subject: String },
}

#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Find or create the user for `credentials`, returning it with the identity
    /// the session should be keyed on.
    ///
    /// OAuth subjects are found-or-created atomically. Local credentials always
    /// create and fail with [`Error::DuplicateUsername`] if the name is taken.
    #[instrument(skip_all)]
    pub async fn find_or_create(&self, credentials: Credentials) -> Result<(User, Identity)> {
        match credentials {
            Credentials::Local { username, password } => {
                let user = self.register(&username, &password).await?;
                let identity = Identity::local(username.trim());
                Ok((user, identity))
            }
            Credentials::External { provider, subject } => {
                if subject.is_empty() {
                    return Err(Error::AuthenticationFailure);
                }
                let user = self.store.find_or_create_external(provider, &subject).await?;
                info!(%provider, user_id = %user.id, "external identity resolved");
                Ok((user, Identity::external(provider, subject)))
            }
        }
    }

    /// Create a local account with a salted Argon2 hash of `password`.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let username = validate_username(username)?;
        validate_password(password)?;

        let hash = hash_password(password)?;
        let user = self.store.create_local(username, &hash).await?;
        info!(user_id = %user.id, "local user registered");
        Ok(user)
    }

    /// Check local credentials against the stored hash.
    #[instrument(skip(self, password))]
    pub async fn authenticate_local(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(Error::AuthenticationFailure);
        }

        let Some(user) = self.store.find_by_identity(&Identity::local(username)).await? else {
            return Err(Error::AuthenticationFailure);
        };

        // OAuth-only accounts have no password to check against.
        let Some(ref hash) = user.password_hash else {
            return Err(Error::AuthenticationFailure);
        };

        if !verify_password(password, hash)? {
            return Err(Error::AuthenticationFailure);
        }

        Ok(user)
    }

    /// Load the full user behind an authenticated session.
    pub async fn resolve(&self, session_user: &SessionUser) -> Result<User> {
        match self.store.find_by_identity(&session_user.identity).await? {
            Some(user) if user.id == session_user.id => Ok(user),
            Some(_) => {
                warn!(identity = %session_user.identity, "session identity now owned by another user");
                Err(Error::NotFound)
            }
            None => Err(Error::NotFound),
        }
    }
}

fn validate_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::InvalidCredential("username is required"));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(Error::InvalidCredential("username is too long"));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(Error::InvalidCredential("username must not contain spaces"));
    }
    Ok(username)
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::InvalidCredential("password is required"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(Error::InvalidCredential("password is too long"));
    }
    Ok(())
}
