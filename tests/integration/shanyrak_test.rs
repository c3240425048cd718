//! Integration tests for listing CRUD, ownership and search.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, listing};

#[tokio::test]
async fn test_create_and_get() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", 1).await;

    let id = app
        .create_shanyrak(owner.token(), listing("rent", 250_000, 2, "Abay 10"))
        .await;

    let response = app
        .request("GET", &format!("/shanyraks/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id);
    assert_eq!(response.body["type"], "rent");
    assert_eq!(response.body["price"], 250_000);
    assert_eq!(response.body["address"], "Abay 10");
    assert_eq!(response.body["rooms_count"], 2);
    assert_eq!(response.body["user_id"], owner.id);
    assert_eq!(response.body["total_comments"], 0);
}

#[tokio::test]
async fn test_create_requires_auth() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/shanyraks",
            Some(listing("buy", 1, 1, "Nowhere")),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_identical_listing_conflicts() {
    let app = TestApp::new();
    let owner = app.register("twice@example.com", 1).await;
    let body = listing("buy", 40_000_000, 3, "Dostyk 5");

    app.create_shanyrak(owner.token(), body.clone()).await;
    let response = app
        .request("POST", "/shanyraks", Some(body), Some(owner.token()))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "Following post already exists");
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new();
    let owner = app.register("invalid@example.com", 1).await;

    let response = app
        .request(
            "POST",
            "/shanyraks",
            Some(listing("buy", -5, 2, "Abay 1")),
            Some(owner.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/shanyraks",
            Some(listing("lease", 5, 2, "Abay 1")),
            Some(owner.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_owner_updates() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", 1).await;
    let stranger = app.register("stranger@example.com", 2).await;
    let id = app
        .create_shanyrak(owner.token(), listing("rent", 100, 1, "Satpayev 3"))
        .await;
    let path = format!("/shanyraks/{id}");

    let response = app
        .request("PATCH", &path, Some(json!({"price": 1})), Some(stranger.token()))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PATCH",
            &path,
            Some(json!({"price": 150, "description": "Renovated"})),
            Some(owner.token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.body["price"], 150);
    assert_eq!(response.body["description"], "Renovated");
    assert_eq!(response.body["address"], "Satpayev 3");
}

#[tokio::test]
async fn test_only_owner_deletes() {
    let app = TestApp::new();
    let owner = app.register("owner@example.com", 1).await;
    let stranger = app.register("stranger@example.com", 2).await;
    let id = app
        .create_shanyrak(owner.token(), listing("buy", 100, 1, "Tole bi 8"))
        .await;
    let path = format!("/shanyraks/{id}");

    let response = app
        .request("DELETE", &path, None, Some(stranger.token()))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, Some(owner.token())).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Shanyrak not found");

    let response = app.request("DELETE", &path, None, Some(owner.token())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_path_id() {
    let app = TestApp::new();

    let response = app.request("GET", "/shanyraks/abc", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

async fn seed(app: &TestApp) {
    let owner = app.register("seller@example.com", 1).await;
    let rows = [
        ("rent", 100_000, 1),
        ("rent", 200_000, 2),
        ("rent", 300_000, 2),
        ("buy", 20_000_000, 2),
        ("buy", 30_000_000, 3),
        ("buy", 40_000_000, 4),
        ("rent", 400_000, 3),
    ];
    for (i, (kind, price, rooms)) in rows.into_iter().enumerate() {
        app.create_shanyrak(
            owner.token(),
            listing(kind, price, rooms, &format!("Street {i}")),
        )
        .await;
    }
}

#[tokio::test]
async fn test_search_defaults_to_five() {
    let app = TestApp::new();
    seed(&app).await;

    let response = app.request("GET", "/shanyraks", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 7);

    let objects = response.body["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 5);
    let ids: Vec<i64> = objects.iter().map(|o| o["id"].as_i64().unwrap()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn test_search_filters_and_window() {
    let app = TestApp::new();
    seed(&app).await;

    let response = app
        .request("GET", "/shanyraks?type=rent&limit=2&offset=1", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 4);
    let objects = response.body["objects"].as_array().unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0]["price"], 200_000);
    assert_eq!(objects[1]["price"], 300_000);

    let response = app
        .request("GET", "/shanyraks?rooms_count=2", None, None)
        .await;
    assert_eq!(response.body["total"], 3);

    let response = app
        .request(
            "GET",
            "/shanyraks?price_from=200000&price_until=30000000",
            None,
            None,
        )
        .await;
    assert_eq!(response.body["total"], 5);

    let response = app
        .request("GET", "/shanyraks?type=buy&offset=10", None, None)
        .await;
    assert_eq!(response.body["total"], 3);
    assert!(response.body["objects"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_inverted_price_range_is_empty() {
    let app = TestApp::new();
    seed(&app).await;

    let response = app
        .request("GET", "/shanyraks?price_from=500&price_until=100", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 0);
}

#[tokio::test]
async fn test_search_rejects_bad_params() {
    let app = TestApp::new();

    for query in ["limit=0", "offset=-1", "price_from=-1", "type=lease"] {
        let response = app
            .request("GET", &format!("/shanyraks?{query}"), None, None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "query {query} should be rejected"
        );
    }
}
