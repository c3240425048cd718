//! Integration tests for comments on listings.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, TestUser, listing};

async fn listing_with_owner(app: &TestApp) -> (TestUser, i64) {
    let owner = app.register("owner@example.com", 1).await;
    let id = app
        .create_shanyrak(owner.token(), listing("rent", 180_000, 2, "Kabanbay 12"))
        .await;
    (owner, id)
}

async fn comment(app: &TestApp, token: &str, post_id: i64, content: &str) -> i64 {
    let response = app
        .request(
            "POST",
            &format!("/shanyraks/{post_id}/comments"),
            Some(json!({ "content": content })),
            Some(token),
        )
        .await;
    assert_eq!(
        response.status,
        StatusCode::OK,
        "Comment failed: {:?}",
        response.body
    );
    response.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_comment_and_list() {
    let app = TestApp::new();
    let (owner, post_id) = listing_with_owner(&app).await;
    let guest = app.register("guest@example.com", 2).await;

    let first = comment(&app, guest.token(), post_id, "Is it still available?").await;
    let second = comment(&app, owner.token(), post_id, "Yes").await;

    let response = app
        .request("GET", &format!("/shanyraks/{post_id}/comments"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let comments = response.body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["id"], first);
    assert_eq!(comments[0]["author_id"], guest.id);
    assert_eq!(comments[0]["content"], "Is it still available?");
    assert!(comments[0]["created_at"].is_string());
    assert_eq!(comments[1]["id"], second);

    let post = app
        .request("GET", &format!("/shanyraks/{post_id}"), None, None)
        .await;
    assert_eq!(post.body["total_comments"], 2);
}

#[tokio::test]
async fn test_comments_on_missing_listing() {
    let app = TestApp::new();
    let user = app.register("lonely@example.com", 1).await;

    let response = app
        .request(
            "POST",
            "/shanyraks/999/comments",
            Some(json!({"content": "hello"})),
            Some(user.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/shanyraks/999/comments", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_requires_auth_and_content() {
    let app = TestApp::new();
    let (owner, post_id) = listing_with_owner(&app).await;
    let path = format!("/shanyraks/{post_id}/comments");

    let response = app
        .request("POST", &path, Some(json!({"content": "hi"})), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("POST", &path, Some(json!({"content": ""})), Some(owner.token()))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_author_edits() {
    let app = TestApp::new();
    let (owner, post_id) = listing_with_owner(&app).await;
    let guest = app.register("guest@example.com", 2).await;
    let comment_id = comment(&app, guest.token(), post_id, "Pets allowed?").await;
    let path = format!("/shanyraks/{post_id}/comments/{comment_id}");

    let response = app
        .request(
            "PATCH",
            &path,
            Some(json!({"content": "edited by owner"})),
            Some(owner.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PATCH",
            &path,
            Some(json!({"content": "Are cats allowed?"})),
            Some(guest.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/shanyraks/{post_id}/comments"), None, None)
        .await;
    assert_eq!(response.body["comments"][0]["content"], "Are cats allowed?");
}

#[tokio::test]
async fn test_only_author_deletes() {
    let app = TestApp::new();
    let (owner, post_id) = listing_with_owner(&app).await;
    let other_post = app
        .create_shanyrak(owner.token(), listing("buy", 9_000_000, 1, "Zhibek Zholy 4"))
        .await;
    let guest = app.register("guest@example.com", 2).await;
    let comment_id = comment(&app, guest.token(), post_id, "Nice view").await;

    let wrong_post = format!("/shanyraks/{other_post}/comments/{comment_id}");
    let response = app
        .request("DELETE", &wrong_post, None, Some(guest.token()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Comment not found");

    let path = format!("/shanyraks/{post_id}/comments/{comment_id}");
    let response = app.request("DELETE", &path, None, Some(owner.token())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, Some(guest.token())).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/shanyraks/{post_id}/comments"), None, None)
        .await;
    assert!(response.body["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_listing_removes_comments() {
    let app = TestApp::new();
    let (owner, post_id) = listing_with_owner(&app).await;
    let comment_id = comment(&app, owner.token(), post_id, "Price is negotiable").await;

    let response = app
        .request("DELETE", &format!("/shanyraks/{post_id}"), None, Some(owner.token()))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "PATCH",
            &format!("/shanyraks/{post_id}/comments/{comment_id}"),
            Some(json!({"content": "too late"})),
            Some(owner.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
