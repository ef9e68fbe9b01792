//! Username + password registration and login.

use api::auth::Credentials;
use api::Identity;
use axum::{extract::State, response::Redirect, Form};
use serde::Deserialize;
use tracing::{error, warn};

use crate::auth_context::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Posted by the login and register forms. Missing fields are rejected by the
/// resolver, not the extractor, so they land on the failure page.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    mut auth: AuthContext,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, AppError> {
    let credentials = Credentials::Local {
        username: form.username.unwrap_or_default(),
        password: form.password.unwrap_or_default(),
    };

    match state.resolver.find_or_create(credentials).await {
        Ok((user, identity)) => {
            auth.sign_in(&user, identity).await?;
            Ok(Redirect::to("/secrets"))
        }
        Err(e) if e.is_client_error() => {
            warn!("registration rejected: {}", e);
            Ok(Redirect::to(state.failed_register_path()))
        }
        Err(e) => {
            error!("Error registering the user: {}", e);
            Ok(Redirect::to(state.failed_register_path()))
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    mut auth: AuthContext,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, AppError> {
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match state.resolver.authenticate_local(&username, &password).await {
        Ok(user) => {
            let identity = Identity::local(user.username.clone().unwrap_or(username));
            auth.sign_in(&user, identity).await?;
            Ok(Redirect::to("/secrets"))
        }
        Err(api::Error::AuthenticationFailure) => {
            warn!("local login failed");
            Ok(Redirect::to(state.failed_login_path()))
        }
        Err(e) => Err(e.into()),
    }
}
