//! OAuth provider configuration.

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use crate::error::{Error, Result};
use crate::models::ProviderKind;

/// Default scope requested from every provider. Only the subject id is consumed.
const DEFAULT_SCOPE: &str = "profile";

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub provider: ProviderKind,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub userinfo_url: String,
    pub redirect_url: RedirectUrl,
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    /// Config for `provider` with its public endpoints and a callback under
    /// `public_url`, i.e. `<public_url>/auth/<provider>/secrets`.
    pub fn new(
        provider: ProviderKind,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        public_url: &str,
    ) -> Result<Self> {
        let (auth_url, token_url, userinfo_url) = default_endpoints(provider);
        let redirect_url = format!(
            "{}/auth/{}/secrets",
            public_url.trim_end_matches('/'),
            provider.slug()
        );

        Ok(Self {
            provider,
            client_id: ClientId::new(client_id.into()),
            client_secret: ClientSecret::new(client_secret.into()),
            auth_url: AuthUrl::new(auth_url.to_string()).map_err(config_error)?,
            token_url: TokenUrl::new(token_url.to_string()).map_err(config_error)?,
            userinfo_url: userinfo_url.to_string(),
            redirect_url: RedirectUrl::new(redirect_url).map_err(config_error)?,
            scopes: vec![DEFAULT_SCOPE.to_string()],
        })
    }

    pub fn with_auth_url(mut self, url: &str) -> Result<Self> {
        self.auth_url = AuthUrl::new(url.to_string()).map_err(config_error)?;
        Ok(self)
    }

    pub fn with_token_url(mut self, url: &str) -> Result<Self> {
        self.token_url = TokenUrl::new(url.to_string()).map_err(config_error)?;
        Ok(self)
    }

    pub fn with_userinfo_url(mut self, url: &str) -> Self {
        self.userinfo_url = url.to_string();
        self
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }
}

fn default_endpoints(provider: ProviderKind) -> (&'static str, &'static str, &'static str) {
    match provider {
        ProviderKind::Google => (
            "https://accounts.google.com/o/oauth2/v2/auth",
            "https://oauth2.googleapis.com/token",
            "https://www.googleapis.com/oauth2/v2/userinfo",
        ),
        ProviderKind::GitHub => (
            "https://github.com/login/oauth/authorize",
            "https://github.com/login/oauth/access_token",
            "https://api.github.com/user",
        ),
    }
}

fn config_error(e: impl std::fmt::Display) -> Error {
    Error::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_url_per_provider() {
        let google =
            OAuthConfig::new(ProviderKind::Google, "id", "secret", "http://localhost:3000/")
                .unwrap();
        assert_eq!(
            google.redirect_url.as_str(),
            "http://localhost:3000/auth/google/secrets"
        );
        assert_eq!(google.scopes, vec!["profile"]);

        let github =
            OAuthConfig::new(ProviderKind::GitHub, "id", "secret", "http://localhost:3000")
                .unwrap();
        assert_eq!(
            github.redirect_url.as_str(),
            "http://localhost:3000/auth/github/secrets"
        );
        assert_eq!(github.userinfo_url, "https://api.github.com/user");
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let config =
            OAuthConfig::new(ProviderKind::Google, "id", "secret", "http://localhost:3000")
                .unwrap();
        assert!(matches!(
            config.with_token_url("not a url"),
            Err(Error::Config(_))
        ));
    }
}
