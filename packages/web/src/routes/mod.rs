//! # Route Controller
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | [`pages::index`] |
//! | `GET /register`, `POST /register` | [`pages::register_form`], [`local::register`] |
//! | `GET /login`, `POST /login` | [`pages::login_form`], [`local::login`] |
//! | `GET /failedLogin`, `GET /failedRegister` | [`pages::failed_login`], [`pages::failed_register`] |
//! | `GET /auth/{provider}` | [`oauth::begin`] |
//! | `GET /auth/{provider}/secrets` | [`oauth::callback`] |
//! | `GET /secrets` | [`secrets::list`] |
//! | `GET /submit`, `POST /submit` | [`secrets::submit_form`], [`secrets::submit`] |
//! | `POST /deleteSecret` | [`secrets::delete`] |
//! | `GET /logout` | [`pages::logout`] |

pub mod local;
pub mod oauth;
pub mod pages;
pub mod secrets;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// All routes with `state` attached. The caller adds the session layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/register", get(pages::register_form).post(local::register))
        .route("/login", get(pages::login_form).post(local::login))
        .route("/failedLogin", get(pages::failed_login))
        .route("/failedRegister", get(pages::failed_register))
        .route("/auth/{provider}", get(oauth::begin))
        .route("/auth/{provider}/secrets", get(oauth::callback))
        .route("/secrets", get(secrets::list))
        .route("/submit", get(secrets::submit_form).post(secrets::submit))
        .route("/deleteSecret", post(secrets::delete))
        .route("/logout", get(pages::logout))
        .fallback(pages::not_found)
        .with_state(state)
}
