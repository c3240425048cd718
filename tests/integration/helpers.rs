//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router against a fresh in-memory store,
//! so tests need no database and never see each other's data.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use shanyrak_api::{AppState, build_app};
use shanyrak_auth::JwtEncoder;
use shanyrak_core::config::{AppConfig, AuthConfig, StoreBackend};
use shanyrak_database::Stores;

/// Default password used by [`TestApp::register`].
pub const PASSWORD: &str = "secret123";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Encoder sharing the app's secrets, for crafting tokens
    pub encoder: JwtEncoder,
}

/// Tokens handed out by a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    /// Access token from the response body.
    pub access_token: String,
    /// Refresh token from the `refresh_token` cookie.
    pub refresh_token: String,
}

/// A registered and logged-in user.
#[derive(Debug, Clone)]
pub struct TestUser {
    /// User ID.
    pub id: i64,
    /// Tokens from logging in.
    pub session: Session,
}

impl TestUser {
    /// The access token.
    pub fn token(&self) -> &str {
        &self.session.access_token
    }
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth = AuthConfig::with_secrets("test-access-secret", "test-refresh-secret");
        config.database.backend = StoreBackend::Memory;

        let encoder = JwtEncoder::new(&config.auth);
        let router = build_app(AppState::new(config.clone(), Stores::in_memory()));

        Self {
            router,
            config,
            encoder,
        }
    }

    /// Sign up a user.
    pub async fn signup(&self, username: &str, phone: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/auth/users",
            Some(json!({
                "username": username,
                "phone": phone,
                "password": password,
                "name": "Test User",
                "city": "Almaty",
            })),
            None,
        )
        .await
    }

    /// Post the login form.
    pub async fn login_raw(&self, username: &str, password: &str) -> TestResponse {
        let form = format!(
            "username={}&password={}",
            username.replace('@', "%40"),
            password
        );
        let req = Request::builder()
            .method("POST")
            .uri("/auth/users/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Login and return both tokens
    pub async fn login(&self, username: &str, password: &str) -> Session {
        let response = self.login_raw(username, password).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        Session {
            access_token: response.body["access_token"]
                .as_str()
                .expect("No access_token in login response")
                .to_string(),
            refresh_token: response
                .cookie("refresh_token")
                .expect("No refresh_token cookie"),
        }
    }

    /// Sign up and log in a user with a phone derived from `seq`.
    pub async fn register(&self, username: &str, seq: u32) -> TestUser {
        let phone = format!("+7701{seq:07}");
        let response = self.signup(username, &phone, PASSWORD).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );

        let id = response.body["id"].as_i64().expect("No id in signup response");
        let session = self.login(username, PASSWORD).await;
        TestUser { id, session }
    }

    /// Create a listing and return its ID.
    pub async fn create_shanyrak(&self, token: &str, body: Value) -> i64 {
        let response = self
            .request("POST", "/shanyraks", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Create failed: {:?}",
            response.body
        );
        response.body["id"].as_i64().expect("No id in create response")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// A listing body with sensible defaults.
pub fn listing(post_type: &str, price: i64, rooms_count: i32, address: &str) -> Value {
    json!({
        "type": post_type,
        "price": price,
        "address": address,
        "area": 54.5,
        "rooms_count": rooms_count,
        "description": "Bright flat near the park",
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Value of a cookie set by this response.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|v| {
                v.strip_prefix(&prefix)
                    .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
            })
    }

    /// The error message of a JSON error body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
