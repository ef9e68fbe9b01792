use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::error;

/// Handler outcome that is not the happy-path page.
#[derive(Debug)]
pub enum AppError {
    /// Short-circuit with a 303 to the given path.
    Redirect(&'static str),
    /// Unknown route or provider.
    NotFound,
    /// Failure from the store, session or hashing layer.
    Api(api::Error),
    /// The session layer was not installed or failed to load.
    Session(&'static str),
}

impl From<api::Error> for AppError {
    fn from(e: api::Error) -> Self {
        match e {
            // The next request through the guard clears the stale session.
            api::Error::NotFound => AppError::Redirect("/"),
            e => AppError::Api(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Redirect(to) => Redirect::to(to).into_response(),
            AppError::NotFound => (StatusCode::NOT_FOUND, Html(ui::not_found())).into_response(),
            AppError::Api(e) => {
                error!("request failed: {}", e);
                internal_error()
            }
            AppError::Session(e) => {
                error!("session unavailable: {}", e);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(ui::error_page("Please try again in a moment.")),
    )
        .into_response()
}
