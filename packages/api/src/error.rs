//! Error types shared by the store, the resolver and the handshake code.

use thiserror::Error;

/// Result type for api operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving identities or touching the store.
#[derive(Debug, Error)]
pub enum Error {
    /// A local account with this username already exists.
    #[error("username is already taken")]
    DuplicateUsername,

    /// Registration input was absent or malformed.
    #[error("invalid credential: {0}")]
    InvalidCredential(&'static str),

    /// Bad local credentials or a failed OAuth handshake.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// The session references a user the store can no longer resolve.
    #[error("user not found")]
    NotFound,

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("oauth error: {0}")]
    OAuth(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failure is the caller's fault rather than the server's.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateUsername | Error::InvalidCredential(_) | Error::AuthenticationFailure
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(Error::DuplicateUsername.is_client_error());
        assert!(Error::InvalidCredential("missing username").is_client_error());
        assert!(Error::AuthenticationFailure.is_client_error());
        assert!(!Error::NotFound.is_client_error());
        assert!(!Error::OAuth("boom".to_string()).is_client_error());
    }
}
