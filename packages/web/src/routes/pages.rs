use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::auth_context::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

pub async fn index(auth: AuthContext) -> Response {
    if auth.is_authenticated() {
        Redirect::to("/secrets").into_response()
    } else {
        Html(ui::home()).into_response()
    }
}

pub async fn register_form(State(state): State<AppState>) -> Html<String> {
    Html(ui::register(state.providers.kinds()))
}

pub async fn login_form(State(state): State<AppState>) -> Html<String> {
    Html(ui::login(state.providers.kinds()))
}

pub async fn failed_login() -> Html<String> {
    Html(ui::failed_login())
}

pub async fn failed_register() -> Html<String> {
    Html(ui::failed_register())
}

pub async fn logout(mut auth: AuthContext) -> Result<Redirect, AppError> {
    auth.sign_out().await?;
    Ok(Redirect::to("/"))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(ui::not_found()))
}
