//! # OAuth 2.0 authorization-code handshake with PKCE
//!
//! One [`OAuthProvider`] per enabled entry in the provider list. Google and GitHub
//! differ only in their [`OAuthConfig`], so the flow is written once:
//!
//! 1. **[`authorize`](OAuthProvider::authorize)**: builds the provider's
//!    authorization URL with the configured scopes, a random CSRF state and a
//!    PKCE S256 challenge. The state and verifier come back as a
//!    [`PendingHandshake`] that the caller parks in the session.
//!
//! 2. **[`exchange_code`](OAuthProvider::exchange_code)**: trades the returned
//!    code plus the PKCE verifier for an access token, then calls the provider's
//!    userinfo endpoint and returns the subject id. Nothing else from the
//!    profile is read.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::config::OAuthConfig;
use crate::error::{Error, Result};
use crate::models::ProviderKind;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// State parked in the session between the redirect to the provider and its callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingHandshake {
    pub provider: ProviderKind,
    pub state: String,
    pub pkce_verifier: String,
}

impl PendingHandshake {
    /// Whether a callback for `provider` carrying `state` belongs to this handshake.
    pub fn matches(&self, provider: ProviderKind, state: &str) -> bool {
        self.provider == provider && self.state == state
    }
}

/// Handler for one configured provider.
#[derive(Debug, Clone)]
pub struct OAuthProvider {
    config: OAuthConfig,
    http: Client,
}

impl OAuthProvider {
    pub fn new(config: OAuthConfig) -> Result<Self> {
        // Token endpoints must not be followed through redirects.
        let http = reqwest::ClientBuilder::new()
            .user_agent(APP_USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn kind(&self) -> ProviderKind {
        self.config.provider
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate the authorization URL and the handshake state to remember.
    pub fn authorize(&self) -> (String, PendingHandshake) {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.config.scopes.iter().cloned().map(Scope::new))
            .set_pkce_challenge(pkce_challenge)
            .url();

        let pending = PendingHandshake {
            provider: self.config.provider,
            state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };

        (auth_url.to_string(), pending)
    }

    /// Exchange an authorization code for a token and return the provider subject id.
    #[instrument(skip_all, fields(provider = %self.config.provider))]
    pub async fn exchange_code(&self, code: &str, pending: PendingHandshake) -> Result<String> {
        let client = self.create_client();

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pending.pkce_verifier))
            .request_async(&self.http)
            .await
            .map_err(|e| Error::OAuth(format!("Token exchange failed: {}", e)))?;

        let access_token = token_result.access_token().secret();

        let profile: Value = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Error::OAuth(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::OAuth(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::OAuth(e.to_string()))?;

        let subject = subject_id(&profile)
            .ok_or_else(|| Error::OAuth("Profile has no id".to_string()))?;
        debug!("resolved provider subject");

        Ok(subject)
    }
}

/// Google reports `id` as a string, GitHub as a number.
fn subject_id(profile: &Value) -> Option<String> {
    match profile.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// The enabled providers, in the order they are shown on the login page.
#[derive(Debug, Clone, Default)]
pub struct OAuthProviders {
    providers: Vec<OAuthProvider>,
}

impl OAuthProviders {
    pub fn new(providers: Vec<OAuthProvider>) -> Self {
        Self { providers }
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&OAuthProvider> {
        self.providers.iter().find(|p| p.kind() == kind)
    }

    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(OAuthProvider::kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
