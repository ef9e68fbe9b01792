//! # Explicit authentication context for handlers
//!
//! [`AuthContext`] is extracted from every request that cares about who is
//! calling. It carries the session handle and the [`SessionUser`] pointer, if
//! any, so handlers decide page-or-redirect from a value they were handed
//! rather than from ambient request state.

use api::auth::{session, SessionUser};
use api::{Identity, User};
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

pub struct AuthContext {
    session: Session,
    user: Option<SessionUser>,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, e)| AppError::Session(e))?;
        let user = session::current_user(&session).await?;
        Ok(Self { session, user })
    }
}

impl AuthContext {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Move to `Authenticated` as `user`, reached through `identity`.
    pub async fn sign_in(&mut self, user: &User, identity: Identity) -> Result<(), AppError> {
        let session_user = session::establish(&self.session, user, identity).await?;
        info!(user_id = %session_user.id, identity = %session_user.identity, "signed in");
        self.user = Some(session_user);
        Ok(())
    }

    pub async fn sign_out(&mut self) -> Result<(), AppError> {
        session::clear(&self.session).await?;
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "signed out");
        }
        Ok(())
    }

    /// Load the full user, or redirect anonymous callers to `anonymous_to`.
    ///
    /// A session whose user can no longer be resolved is cleared and sent to `/`.
    pub async fn require_user(
        &mut self,
        state: &AppState,
        anonymous_to: &'static str,
    ) -> Result<User, AppError> {
        let Some(session_user) = self.user.clone() else {
            return Err(AppError::Redirect(anonymous_to));
        };

        match state.resolver.resolve(&session_user).await {
            Ok(user) => Ok(user),
            Err(api::Error::NotFound) => {
                warn!(user_id = %session_user.id, "session user no longer exists");
                self.sign_out().await?;
                Err(AppError::Redirect("/"))
            }
            Err(e) => Err(e.into()),
        }
    }
}
