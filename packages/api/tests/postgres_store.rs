//! `PgUserStore` against a throwaway PostgreSQL container.
//!
//! Needs a Docker-compatible runtime: `cargo test -p api -- --ignored`.

use api::db::{self, PgUserStore, UserStore};
use api::{Error, Identity, ProviderKind};
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use uuid::Uuid;

struct TestDb {
    pool: PgPool,
    store: PgUserStore,
    _container: ContainerAsync<Postgres>,
}

impl TestDb {
    async fn new() -> Self {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start postgres container");
        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");

        let url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);
        let pool = db::connect(&url, 20).await.expect("Failed to connect");
        db::migrate(&pool).await.expect("Failed to migrate");

        Self {
            store: PgUserStore::new(pool.clone()),
            pool,
            _container: container,
        }
    }

    async fn secrets_of(&self, id: Uuid) -> Vec<String> {
        self.store.find_by_id(id).await.unwrap().unwrap().secrets
    }
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn test_create_local_rejects_duplicates() {
    let db = TestDb::new().await;

    let alice = db.store.create_local("alice", "hash").await.unwrap();
    assert_eq!(alice.username.as_deref(), Some("alice"));
    assert!(alice.secrets.is_empty());

    let err = db.store.create_local("alice", "other").await.unwrap_err();
    assert!(matches!(err, Error::DuplicateUsername));
    assert_eq!(db.store.count().await.unwrap(), 1);

    let found = db
        .store
        .find_by_identity(&Identity::local("alice"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, alice.id);
    assert_eq!(found.password_hash.as_deref(), Some("hash"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a container runtime"]
async fn test_concurrent_find_or_create_yields_one_row() {
    let db = TestDb::new().await;

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let store = db.store.clone();
        tasks.push(tokio::spawn(async move {
            store
                .find_or_create_external(ProviderKind::Google, "g-1")
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(db.store.count().await.unwrap(), 1);

    // Same subject at the other provider is another user.
    let github = db
        .store
        .find_or_create_external(ProviderKind::GitHub, "g-1")
        .await
        .unwrap();
    assert_ne!(github.id, ids[0]);
    assert!(github.google_id.is_none());
    assert_eq!(db.store.count().await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn test_remove_secret_shifts_and_ignores_out_of_range() {
    let db = TestDb::new().await;
    let user = db.store.create_local("alice", "hash").await.unwrap();

    for secret in ["first", "second", "third"] {
        db.store.push_secret(user.id, secret).await.unwrap();
    }

    let removed = db.store.remove_secret(user.id, 1).await.unwrap();
    assert_eq!(removed.as_deref(), Some("second"));
    assert_eq!(db.secrets_of(user.id).await, vec!["first", "third"]);

    assert_eq!(db.store.remove_secret(user.id, 2).await.unwrap(), None);
    assert_eq!(db.store.remove_secret(user.id, 99).await.unwrap(), None);
    assert_eq!(db.secrets_of(user.id).await, vec!["first", "third"]);

    assert!(matches!(
        db.store.remove_secret(Uuid::new_v4(), 0).await,
        Err(Error::NotFound)
    ));
    assert!(matches!(
        db.store.push_secret(Uuid::new_v4(), "lost").await,
        Err(Error::NotFound)
    ));
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn test_schema_rejects_unreachable_rows() {
    let db = TestDb::new().await;

    let no_identity = sqlx::query("INSERT INTO users (id) VALUES ($1)")
        .bind(Uuid::new_v4())
        .execute(&db.pool)
        .await;
    assert!(no_identity.is_err());

    let local_without_password = sqlx::query("INSERT INTO users (id, username) VALUES ($1, $2)")
        .bind(Uuid::new_v4())
        .bind("bob")
        .execute(&db.pool)
        .await;
    assert!(local_without_password.is_err());

    assert_eq!(db.store.count().await.unwrap(), 0);
}
