//! Data models for the application.

mod identity;
mod user;

pub use identity::{Identity, ProviderKind};
pub use user::User;
