//! Integration tests for signup, login, profile and token rotation.

mod helpers;

use axum::body::Body;
use chrono::{Duration, Utc};
use http::{Request, StatusCode, header};
use serde_json::json;

use shanyrak_auth::{Claims, JwtEncoder, TokenKind};
use shanyrak_core::config::AuthConfig;
use shanyrak_core::types::UserId;

use helpers::{PASSWORD, TestApp};

fn expired_access_token(app: &TestApp, user_id: i64) -> String {
    let claims = Claims::new(
        UserId::new(user_id),
        TokenKind::Access,
        Utc::now() - Duration::hours(1),
        Duration::minutes(15),
    )
    .expect("claims");
    app.encoder.sign(&claims).expect("sign")
}

fn me_request(access: &str, cookies: Option<String>) -> Request<Body> {
    let mut req = Request::builder()
        .method("GET")
        .uri("/auth/users/me")
        .header(header::AUTHORIZATION, format!("Bearer {access}"));
    if let Some(cookies) = cookies {
        req = req.header(header::COOKIE, cookies);
    }
    req.body(Body::empty()).expect("request")
}

#[tokio::test]
async fn test_signup_returns_public_profile() {
    let app = TestApp::new();

    let response = app
        .signup("aruzhan@example.com", "+77011234567", PASSWORD)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "aruzhan@example.com");
    assert_eq!(response.body["phone"], "+77011234567");
    assert_eq!(response.body["city"], "Almaty");
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_rejects_duplicates() {
    let app = TestApp::new();
    app.signup("dup@example.com", "+77010000001", PASSWORD).await;

    let same_username = app
        .signup("dup@example.com", "+77010000002", PASSWORD)
        .await;
    assert_eq!(same_username.status, StatusCode::CONFLICT);

    let same_phone = app
        .signup("other@example.com", "+77010000001", PASSWORD)
        .await;
    assert_eq!(same_phone.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new();

    let bad_email = app.signup("not-an-email", "+77011234567", PASSWORD).await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.body["error"], "VALIDATION_ERROR");

    let bad_phone = app.signup("a@example.com", "phone", PASSWORD).await;
    assert_eq!(bad_phone.status, StatusCode::BAD_REQUEST);

    let short_password = app.signup("b@example.com", "+77011234567", "abc").await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_sets_both_cookies() {
    let app = TestApp::new();
    app.signup("login@example.com", "+77011234567", PASSWORD).await;

    let response = app.login_raw("login@example.com", PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");
    let access = response.body["access_token"].as_str().unwrap().to_string();
    assert_eq!(response.cookie("access_token"), Some(access));
    assert!(response.cookie("refresh_token").is_some());

    let set_cookie = response
        .headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert!(set_cookie.iter().all(|c| c.contains("HttpOnly")));
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new();
    app.signup("known@example.com", "+77011234567", PASSWORD).await;

    let unknown = app.login_raw("nobody@example.com", PASSWORD).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.message(), "User not found");

    let wrong = app.login_raw("known@example.com", "wrong-password").await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.message(), "Incorrect password");
}

#[tokio::test]
async fn test_me_with_bearer_and_cookie() {
    let app = TestApp::new();
    let user = app.register("me@example.com", 1).await;

    let response = app
        .request("GET", "/auth/users/me", None, Some(user.token()))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], user.id);
    assert_eq!(response.body["username"], "me@example.com");

    let req = Request::builder()
        .method("GET")
        .uri("/auth/users/me")
        .header(header::COOKIE, format!("access_token={}", user.token()))
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], user.id);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/auth/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Missing access token");

    let response = app
        .request("GET", "/auth/users/me", None, Some("garbage"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid access token");
}

#[tokio::test]
async fn test_update_profile_and_password() {
    let app = TestApp::new();
    let user = app.register("edit@example.com", 1).await;

    let response = app
        .request(
            "PATCH",
            "/auth/users/me",
            Some(json!({"name": "Dana", "city": "Astana", "password": "new-password"})),
            Some(user.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let me = app
        .request("GET", "/auth/users/me", None, Some(user.token()))
        .await;
    assert_eq!(me.body["name"], "Dana");
    assert_eq!(me.body["city"], "Astana");

    let old = app.login_raw("edit@example.com", PASSWORD).await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    app.login("edit@example.com", "new-password").await;
}

#[tokio::test]
async fn test_update_profile_keeps_phone_unique() {
    let app = TestApp::new();
    app.register("first@example.com", 1).await;
    let second = app.register("second@example.com", 2).await;

    let response = app
        .request(
            "PATCH",
            "/auth/users/me",
            Some(json!({"phone": "+77010000001"})),
            Some(second.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_refresh_endpoint() {
    let app = TestApp::new();
    let user = app.register("refresh@example.com", 1).await;

    let req = Request::builder()
        .method("POST")
        .uri("/auth/refresh")
        .header(
            header::COOKIE,
            format!("refresh_token={}", user.session.refresh_token),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");
    let access = response.body["access_token"].as_str().unwrap().to_string();
    assert_eq!(response.cookie("access_token"), Some(access.clone()));
    assert!(response.cookie("refresh_token").is_none());

    let me = app
        .request("GET", "/auth/users/me", None, Some(&access))
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_endpoint_rejections() {
    let app = TestApp::new();
    let user = app.register("nocookie@example.com", 1).await;

    let missing = app.request("POST", "/auth/refresh", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.message(), "Missing refresh token");

    // An access token is signed with the other secret.
    let req = Request::builder()
        .method("POST")
        .uri("/auth/refresh")
        .header(header::COOKIE, format!("refresh_token={}", user.token()))
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid refresh token");
}

#[tokio::test]
async fn test_expired_access_token_is_rotated() {
    let app = TestApp::new();
    let user = app.register("rotate@example.com", 1).await;
    let expired = expired_access_token(&app, user.id);

    let response = app
        .send(me_request(
            &expired,
            Some(format!("refresh_token={}", user.session.refresh_token)),
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], user.id);

    let rotated = response
        .headers
        .get("x-new-access-token")
        .expect("rotation header")
        .to_str()
        .unwrap()
        .to_string();
    assert_ne!(rotated, expired);
    assert_eq!(response.cookie("access_token"), Some(rotated.clone()));
    assert!(response.cookie("refresh_token").is_none());

    let me = app
        .request("GET", "/auth/users/me", None, Some(&rotated))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert!(me.headers.get("x-new-access-token").is_none());
}

#[tokio::test]
async fn test_expired_access_token_without_refresh() {
    let app = TestApp::new();
    let user = app.register("stale@example.com", 1).await;
    let expired = expired_access_token(&app, user.id);

    let response = app.send(me_request(&expired, None)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.message(),
        "Access token expired. Refresh token required."
    );

    let response = app
        .send(me_request(&expired, Some("refresh_token=forged".to_string())))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid refresh token");
    assert!(response.headers.get("x-new-access-token").is_none());
}

#[tokio::test]
async fn test_invalid_access_token_is_not_refreshed() {
    let app = TestApp::new();
    let user = app.register("foreign@example.com", 1).await;
    let foreign = JwtEncoder::new(&AuthConfig::with_secrets("foreign-access", "foreign-refresh"))
        .issue_access(UserId::new(user.id))
        .expect("issue");

    let response = app
        .send(me_request(
            &foreign,
            Some(format!("refresh_token={}", user.session.refresh_token)),
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid access token");
    assert!(response.headers.get("x-new-access-token").is_none());
    assert!(response.cookie("access_token").is_none());
}

#[tokio::test]
async fn test_stale_cookie_does_not_block_login() {
    let app = TestApp::new();
    app.signup("fresh@example.com", "+77011234567", PASSWORD).await;

    let req = Request::builder()
        .method("POST")
        .uri("/auth/users/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, "access_token=garbage")
        .body(Body::from(format!(
            "username=fresh%40example.com&password={PASSWORD}"
        )))
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_cors_exposes_rotation_header() {
    let app = TestApp::new();
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .header(header::ORIGIN, "https://app.example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.send(req).await;
    let exposed = response
        .headers
        .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
        .expect("expose headers")
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("x-new-access-token"));
}

#[tokio::test]
async fn test_health_reports_store() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "memory");
    assert_eq!(response.body["store_connected"], true);
}
