use std::sync::Arc;

use anyhow::Context;
use api::db::{MemoryUserStore, PgUserStore, UserStore};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use crate::routes;
use crate::settings::{self, Settings};
use crate::state::AppState;

/// Routes wrapped in a signed-cookie session layer backed by `session_store`.
pub fn app<S>(state: AppState, session_store: S, settings: &Settings) -> anyhow::Result<Router>
where
    S: SessionStore + Clone,
{
    let secure = settings.auth.public_url.starts_with("https://");
    let router = with_sessions(routes::router(state), session_store, &settings.session, secure)?;
    Ok(router.layer(TraceLayer::new_for_http()))
}

fn with_sessions<S>(
    router: Router,
    session_store: S,
    settings: &settings::Session,
    secure: bool,
) -> anyhow::Result<Router>
where
    S: SessionStore + Clone,
{
    let days = u64::try_from(settings.inactivity_days.max(1)).unwrap_or(1);

    let layer = SessionManagerLayer::new(session_store)
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            std::time::Duration::from_secs(60 * 60 * 24 * days)
                .try_into()
                .context("session.inactivity_days is out of range")?,
        ))
        .with_signed(settings.key()?);

    Ok(router.layer(layer))
}

/// Connect the configured stores and serve until ctrl-c.
pub async fn launch(settings: Settings) -> anyhow::Result<()> {
    let providers = settings.oauth.providers(&settings.auth.public_url)?;
    if providers.is_empty() {
        info!("no OAuth providers configured, local login only");
    }

    let router = if settings.database.in_memory {
        info!("using in-memory user and session stores");
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let state = AppState::new(store, providers, settings.auth.failure_pages);
        app(state, MemoryStore::default(), &settings)?
    } else {
        let pool = api::db::connect(&settings.database.url, settings.database.max_connections)
            .await
            .context("Failed to connect to database")?;
        api::db::migrate(&pool)
            .await
            .context("Failed to run migrations")?;

        let session_store = PostgresStore::new(pool.clone());
        session_store
            .migrate()
            .await
            .context("Failed to create the session table")?;

        let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
        let state = AppState::new(store, providers, settings.auth.failure_pages);
        app(state, session_store, &settings)?
    };

    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server listening on {}", address);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}
