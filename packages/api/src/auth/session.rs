//! # Session Manager
//!
//! The browser holds only an opaque session cookie; the session record on the
//! server holds at most two entries:
//!
//! - `user`: a [`SessionUser`]: the user id, the username if any,
//!   and the [`Identity`] the session was established with. Everything else is
//!   re-read from the store on each request that needs it.
//! - `oauth_handshake`: a [`PendingHandshake`] while an OAuth round trip
//!   is in flight.
//!
//! Which of those are present gives the [`SessionState`].

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use super::oauth::PendingHandshake;
use crate::error::Result;
use crate::models::{Identity, User};

/// Key for storing the authenticated user pointer in the session.
const SESSION_USER_KEY: &str = "user";

/// Key for storing the in-flight OAuth handshake in the session.
const SESSION_HANDSHAKE_KEY: &str = "oauth_handshake";

/// Minimal identity pointer serialized into the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: Option<String>,
    pub identity: Identity,
}

impl SessionUser {
    pub fn new(user: &User, identity: Identity) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            identity,
        }
    }
}

/// Where a session stands in the login lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticating(PendingHandshake),
    Authenticated(SessionUser),
}

/// Serialize `user` into the session under a fresh session id.
pub async fn establish(session: &Session, user: &User, identity: Identity) -> Result<SessionUser> {
    let session_user = SessionUser::new(user, identity);
    session.cycle_id().await?;
    session.remove::<PendingHandshake>(SESSION_HANDSHAKE_KEY).await?;
    session.insert(SESSION_USER_KEY, &session_user).await?;
    Ok(session_user)
}

/// Rehydrate the identity pointer, if the session is authenticated.
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>> {
    Ok(session.get(SESSION_USER_KEY).await?)
}

pub async fn state(session: &Session) -> Result<SessionState> {
    if let Some(user) = current_user(session).await? {
        return Ok(SessionState::Authenticated(user));
    }
    let pending: Option<PendingHandshake> = session.get(SESSION_HANDSHAKE_KEY).await?;
    Ok(pending.map_or(SessionState::Anonymous, SessionState::Authenticating))
}

/// Park an OAuth handshake in the session until the provider calls back.
pub async fn begin_handshake(session: &Session, pending: &PendingHandshake) -> Result<()> {
    session.insert(SESSION_HANDSHAKE_KEY, pending).await?;
    Ok(())
}

/// Remove and return the in-flight handshake. A handshake is usable once.
pub async fn take_handshake(session: &Session) -> Result<Option<PendingHandshake>> {
    Ok(session.remove(SESSION_HANDSHAKE_KEY).await?)
}

/// Drop everything and return the session to `Anonymous`.
pub async fn clear(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}
