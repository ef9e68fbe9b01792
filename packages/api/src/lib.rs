//! # API crate: identity, storage and sessions for the secrets app
//!
//! Everything the route controller in the `web` crate needs to know about users
//! lives here. Handlers never talk to SQL, argon2 or the OAuth providers directly.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Password hashing, OAuth provider configuration and handshake, session helpers, the identity resolver |
//! | [`db`] | The [`db::UserStore`] trait with PostgreSQL and in-memory implementations, pool setup and migrations |
//! | [`models`] | The [`User`] record and the [`Identity`] it is looked up by |
//! | [`error`] | The crate-wide [`Error`] type |

pub mod auth;
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{Identity, ProviderKind, User};
