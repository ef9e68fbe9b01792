//! Secret listing, submission and deletion. Every handler requires a signed-in user.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth_context::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub index: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    mut auth: AuthContext,
) -> Result<Html<String>, AppError> {
    let user = auth.require_user(&state, "/").await?;
    Ok(Html(ui::secrets(user.secrets)))
}

pub async fn submit_form(
    State(state): State<AppState>,
    mut auth: AuthContext,
) -> Result<Html<String>, AppError> {
    auth.require_user(&state, "/login").await?;
    Ok(Html(ui::submit()))
}

pub async fn submit(
    State(state): State<AppState>,
    mut auth: AuthContext,
    Form(form): Form<SubmitForm>,
) -> Result<Redirect, AppError> {
    let user = auth.require_user(&state, "/login").await?;

    let secret = form.secret.unwrap_or_default();
    if secret.trim().is_empty() {
        return Ok(Redirect::to("/submit"));
    }

    let user = state.store().push_secret(user.id, &secret).await?;
    info!(user_id = %user.id, count = user.secrets.len(), "secret stored");
    Ok(Redirect::to("/secrets"))
}

pub async fn delete(
    State(state): State<AppState>,
    mut auth: AuthContext,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let user = auth.require_user(&state, "/login").await?;

    let Some(index) = form.index.as_deref().and_then(|i| i.trim().parse::<usize>().ok()) else {
        warn!(user_id = %user.id, "delete with a malformed index");
        return Ok(Redirect::to("/secrets"));
    };

    match state.store().remove_secret(user.id, index).await? {
        Some(_) => info!(user_id = %user.id, index, "secret deleted"),
        None => warn!(user_id = %user.id, index, "delete index out of range"),
    }
    Ok(Redirect::to("/secrets"))
}
