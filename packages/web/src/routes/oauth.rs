//! OAuth authorization-code handshake, shared by every configured provider.

use api::auth::{session, Credentials};
use api::ProviderKind;
use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::auth_context::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn provider_kind(slug: &str) -> Result<ProviderKind, AppError> {
    slug.parse::<ProviderKind>().map_err(|_| AppError::NotFound)
}

/// Redirect the browser to the provider's consent page.
pub async fn begin(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(provider): Path<String>,
) -> Result<Redirect, AppError> {
    let kind = provider_kind(&provider)?;
    let Some(client) = state.providers.get(kind) else {
        return Err(AppError::NotFound);
    };

    let (url, pending) = client.authorize();
    session::begin_handshake(auth.session(), &pending).await?;
    info!(provider = %kind, "oauth handshake started");
    Ok(Redirect::to(&url))
}

/// Provider redirect target. Any failure returns the browser to `/login`.
pub async fn callback(
    State(state): State<AppState>,
    mut auth: AuthContext,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, AppError> {
    let kind = provider_kind(&provider)?;
    let Some(client) = state.providers.get(kind) else {
        return Err(AppError::NotFound);
    };

    // Consumed whatever the outcome so a state value is never replayed.
    let pending = session::take_handshake(auth.session()).await?;

    if let Some(reason) = query.error {
        warn!(provider = %kind, %reason, "provider denied authorization");
        return Ok(Redirect::to("/login"));
    }

    let (Some(code), Some(returned_state)) = (query.code, query.state) else {
        warn!(provider = %kind, "callback without code or state");
        return Ok(Redirect::to("/login"));
    };

    let Some(pending) = pending.filter(|p| p.matches(kind, &returned_state)) else {
        warn!(provider = %kind, "callback state did not match the pending handshake");
        return Ok(Redirect::to("/login"));
    };

    let subject = match client.exchange_code(&code, pending).await {
        Ok(subject) => subject,
        Err(e) => {
            warn!(provider = %kind, "code exchange failed: {}", e);
            return Ok(Redirect::to("/login"));
        }
    };

    let credentials = Credentials::External { provider: kind, subject };
    match state.resolver.find_or_create(credentials).await {
        Ok((user, identity)) => {
            auth.sign_in(&user, identity).await?;
            Ok(Redirect::to("/secrets"))
        }
        Err(api::Error::AuthenticationFailure) => Ok(Redirect::to("/login")),
        Err(e) => {
            error!(provider = %kind, "Error resolving the external identity: {}", e);
            Err(e.into())
        }
    }
}
