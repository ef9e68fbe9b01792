//! # Database module: the User Store
//!
//! [`UserStore`] is the only way the rest of the application reads or writes
//! users. Two implementations exist:
//!
//! - [`PgUserStore`]: PostgreSQL via SQLx. Provider ids and usernames carry
//!   `UNIQUE` constraints, so find-or-create is a single atomic upsert.
//! - [`MemoryUserStore`]: a process-local store for tests and `database.in_memory`
//!   deployments. All users sit behind one mutex, which gives the same
//!   at-most-one-record-per-identity guarantee.
//!
//! ## Re-exports
//!
//! - [`connect`] / [`migrate`]: open the pool and apply the embedded migrations.

mod memory;
mod pool;
mod postgres;

pub use memory::MemoryUserStore;
pub use pool::{connect, migrate};
pub use postgres::PgUserStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Identity, ProviderKind, User};

/// Durable storage and lookup of [`User`] records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Look a user up through exactly the field the identity names.
    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>>;

    /// Return the user owning `subject` at `provider`, creating it if unseen.
    async fn find_or_create_external(&self, provider: ProviderKind, subject: &str)
        -> Result<User>;

    /// Insert a local account. Fails with `DuplicateUsername` if the name is taken.
    async fn create_local(&self, username: &str, password_hash: &str) -> Result<User>;

    /// Append a secret and return the updated user.
    async fn push_secret(&self, id: Uuid, secret: &str) -> Result<User>;

    /// Remove the secret at `index`. Returns the removed entry, or `None` when
    /// the index is out of range and nothing changed.
    async fn remove_secret(&self, id: Uuid, index: usize) -> Result<Option<String>>;

    async fn count(&self) -> Result<u64>;
}
