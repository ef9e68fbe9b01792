#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use api::db::{MemoryUserStore, UserStore};
use axum::{
    body::Body,
    extract::Form,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use web::{AppState, Settings};

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// The router plus a one-cookie jar, standing in for a browser.
pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryUserStore>,
    cookie: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings("")
    }

    pub fn with_settings(toml: &str) -> Self {
        let settings = Settings::from_toml(toml).unwrap();
        let providers = settings
            .oauth
            .providers(&settings.auth.public_url)
            .unwrap();

        let store = Arc::new(MemoryUserStore::new());
        let dyn_store: Arc<dyn UserStore> = store.clone();
        let state = AppState::new(dyn_store, providers, settings.auth.failure_pages);
        let router = web::app(state, MemoryStore::default(), &settings).unwrap();

        Self {
            router,
            store,
            cookie: None,
        }
    }

    /// A fresh browser against the same server.
    pub fn new_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            store: self.store.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::builder().method("GET").uri(uri);
        self.send(request, Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(body)).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        self.store_cookie(response.headers());

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    fn store_cookie(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let value = value.to_str().unwrap();
            if value.contains("Max-Age=0") {
                self.cookie = None;
            } else if let Some(pair) = value.split(';').next() {
                self.cookie = Some(pair.to_string());
            }
        }
    }

    pub async fn register(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/register", &[("username", username), ("password", password)])
            .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }
}

/// Bind a stand-in OAuth provider on an ephemeral port and return its base URL.
///
/// `POST /token` issues `at-<code>` for any code except `bad`. The userinfo
/// endpoints echo the code back as the subject: `/google/user` as a string
/// `g-<code>`, `/github/user` as a number.
pub async fn spawn_provider() -> String {
    let app = Router::new()
        .route("/authorize", get(|| async { "consent" }))
        .route("/token", post(token))
        .route("/google/user", get(google_user))
        .route("/github/user", get(github_user));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    match form.get("code").map(String::as_str) {
        Some("bad") | None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response(),
        Some(code) => Json(json!({
            "access_token": format!("at-{}", code),
            "token_type": "bearer",
        }))
        .into_response(),
    }
}

fn bearer_code(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer at-")
        .map(str::to_string)
}

async fn google_user(headers: HeaderMap) -> Response {
    match bearer_code(&headers) {
        Some(code) => Json(json!({ "id": format!("g-{}", code), "name": code })).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn github_user(headers: HeaderMap) -> Response {
    match bearer_code(&headers).and_then(|code| code.parse::<u64>().ok()) {
        Some(id) => Json(json!({ "id": id, "login": "octocat" })).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// Settings with both providers pointed at the stand-in at `base`.
pub fn provider_settings(base: &str) -> String {
    format!(
        r#"
[oauth.google]
client_id = "google-client"
client_secret = "google-secret"
auth_url = "{base}/authorize"
token_url = "{base}/token"
userinfo_url = "{base}/google/user"

[oauth.github]
client_id = "github-client"
client_secret = "github-secret"
auth_url = "{base}/authorize"
token_url = "{base}/token"
userinfo_url = "{base}/github/user"
"#
    )
}

/// The `state` query parameter of a provider authorization redirect.
pub fn state_param(location: &str) -> String {
    let url = url::Url::parse(location).unwrap();
    url.query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap()
}
