//! Application state

use std::sync::Arc;

use api::auth::{IdentityResolver, OAuthProviders};
use api::db::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub resolver: IdentityResolver,
    pub providers: Arc<OAuthProviders>,
    pub failure_pages: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, providers: OAuthProviders, failure_pages: bool) -> Self {
        Self {
            resolver: IdentityResolver::new(store),
            providers: Arc::new(providers),
            failure_pages,
        }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        self.resolver.store()
    }

    pub fn failed_login_path(&self) -> &'static str {
        if self.failure_pages {
            "/failedLogin"
        } else {
            "/login"
        }
    }

    pub fn failed_register_path(&self) -> &'static str {
        if self.failure_pages {
            "/failedRegister"
        } else {
            "/register"
        }
    }
}
