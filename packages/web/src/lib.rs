//! # Web Server
//!
//! Axum front end for the secrets app: routes, the session layer and the
//! explicit [`auth_context::AuthContext`] every protected handler extracts.

pub mod application;
pub mod auth_context;
pub mod error;
pub mod routes;
pub mod settings;
pub mod state;

pub use application::{app, launch};
pub use settings::Settings;
pub use state::AppState;
