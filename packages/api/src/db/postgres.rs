//! PostgreSQL-backed [`UserStore`].

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::UserStore;
use crate::error::{Error, Result};
use crate::models::{Identity, ProviderKind, User};

/// User store over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>> {
        let user: Option<User> = match identity {
            Identity::Local { username } => {
                sqlx::query_as("SELECT * FROM users WHERE username = $1")
                    .bind(username)
                    .fetch_optional(&self.pool)
                    .await?
            }
            Identity::External { provider, subject } => {
                let sql = format!("SELECT * FROM users WHERE {} = $1", provider.column());
                sqlx::query_as(&sql)
                    .bind(subject)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_or_create_external(
        &self,
        provider: ProviderKind,
        subject: &str,
    ) -> Result<User> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let sql = format!(
            r#"
            INSERT INTO users (id, {column})
            VALUES ($1, $2)
            ON CONFLICT ({column})
            DO UPDATE SET updated_at = NOW()
            RETURNING *
            "#,
            column = provider.column()
        );
        let user: User = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(subject)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, password_hash))]
    async fn create_local(&self, username: &str, password_hash: &str) -> Result<User> {
        let result: std::result::Result<User, sqlx::Error> = sqlx::query_as(
            "INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(Error::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, secret))]
    async fn push_secret(&self, id: Uuid, secret: &str) -> Result<User> {
        let user: Option<User> = sqlx::query_as(
            r#"
            UPDATE users
            SET secrets = array_append(secrets, $2), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(secret)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(Error::NotFound)
    }

    #[instrument(skip(self))]
    async fn remove_secret(&self, id: Uuid, index: usize) -> Result<Option<String>> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(Vec<String>,)> =
            sqlx::query_as("SELECT secrets FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let (mut secrets,) = row.ok_or(Error::NotFound)?;
        if index >= secrets.len() {
            tx.rollback().await?;
            return Ok(None);
        }
        let removed = secrets.remove(index);

        sqlx::query("UPDATE users SET secrets = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(&secrets)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(removed))
    }

    async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}
