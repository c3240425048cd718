//! Integration tests for the favorites set.

mod helpers;

use http::StatusCode;

use helpers::{TestApp, listing};

const FAVORITES: &str = "/auth/users/favorites/shanyraks";

#[tokio::test]
async fn test_favorites_keep_insertion_order() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", 1).await;
    let fan = app.register("fan@example.com", 2).await;
    let first = app
        .create_shanyrak(owner.token(), listing("rent", 100, 1, "Abay 1"))
        .await;
    let second = app
        .create_shanyrak(owner.token(), listing("rent", 200, 2, "Abay 2"))
        .await;

    for id in [second, first] {
        let response = app
            .request("POST", &format!("{FAVORITES}/{id}"), None, Some(fan.token()))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app.request("GET", FAVORITES, None, Some(fan.token())).await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["shanyraks"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], second);
    assert_eq!(items[0]["address"], "Abay 2");
    assert_eq!(items[1]["id"], first);

    let response = app.request("GET", FAVORITES, None, Some(owner.token())).await;
    assert!(response.body["shanyraks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_favorites_are_a_set() {
    let app = TestApp::new();
    let user = app.register("user@example.com", 1).await;
    let id = app
        .create_shanyrak(user.token(), listing("buy", 100, 1, "Baitursynov 7"))
        .await;
    let path = format!("{FAVORITES}/{id}");

    let response = app.request("POST", &path, None, Some(user.token())).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("POST", &path, None, Some(user.token())).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app.request("DELETE", &path, None, Some(user.token())).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("DELETE", &path, None, Some(user.token())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorite_missing_listing() {
    let app = TestApp::new();
    let user = app.register("user@example.com", 1).await;

    let response = app
        .request("POST", &format!("{FAVORITES}/404"), None, Some(user.token()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_listing_leaves_favorites() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", 1).await;
    let fan = app.register("fan@example.com", 2).await;
    let id = app
        .create_shanyrak(owner.token(), listing("rent", 100, 1, "Gogol 3"))
        .await;

    app.request("POST", &format!("{FAVORITES}/{id}"), None, Some(fan.token()))
        .await;
    app.request("DELETE", &format!("/shanyraks/{id}"), None, Some(owner.token()))
        .await;

    let response = app.request("GET", FAVORITES, None, Some(fan.token())).await;
    assert!(response.body["shanyraks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_favorites_require_auth() {
    let app = TestApp::new();

    let response = app.request("GET", FAVORITES, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
