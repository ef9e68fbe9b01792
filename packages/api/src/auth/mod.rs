//! Authentication: local passwords, OAuth providers, sessions and identity resolution.

mod config;
mod oauth;
mod password;
mod resolver;
pub mod session;

pub use config::OAuthConfig;
pub use oauth::{OAuthProvider, OAuthProviders, PendingHandshake};
pub use password::{hash_password, verify_password};
pub use resolver::{Credentials, IdentityResolver};
pub use session::{SessionState, SessionUser};
