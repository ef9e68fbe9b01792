//! # Identities a user can be reached by
//!
//! A [`User`](super::User) row carries up to three lookup keys: a local username,
//! a Google subject id and a GitHub subject id. [`Identity`] names exactly one of
//! them, so a lookup always targets a single column and can never match a
//! different record through an unrelated field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An external OAuth identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    GitHub,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Google, ProviderKind::GitHub];

    /// Path segment and config key, e.g. `/auth/google`.
    pub fn slug(self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::GitHub => "github",
        }
    }

    /// Human-readable name for link labels.
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::Google => "Google",
            ProviderKind::GitHub => "GitHub",
        }
    }

    /// Column in the `users` table holding this provider's subject id.
    pub(crate) fn column(self) -> &'static str {
        match self {
            ProviderKind::Google => "google_id",
            ProviderKind::GitHub => "github_id",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| format!("Unknown provider: {}", s))
    }
}

/// The single key a session resolves its user through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Local { username: String },
    External { provider: ProviderKind, subject: String },
}

impl Identity {
    pub fn local(username: impl Into<String>) -> Self {
        Identity::Local {
            username: username.into(),
        }
    }

    pub fn external(provider: ProviderKind, subject: impl Into<String>) -> Self {
        Identity::External {
            provider,
            subject: subject.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Local { username } => write!(f, "local:{}", username),
            Identity::External { provider, subject } => write!(f, "{}:{}", provider, subject),
        }
    }
}
