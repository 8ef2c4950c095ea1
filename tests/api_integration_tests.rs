//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles through the router, including the
//! item cache's behaviour as seen by clients.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use inventory_api::auth::{JwtTokenService, TokenService, User};
use inventory_api::cache::MemoryBackend;
use inventory_api::{create_router, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let config = Config::default();
    let state = AppState::from_config(&config, Arc::new(MemoryBackend::new(100)));
    create_router(state)
}

/// Mints tokens with the same secret the test app verifies with.
fn token_pair() -> (String, String) {
    let config = Config::default();
    let service = JwtTokenService::new(
        &config.jwt_secret,
        config.access_token_ttl,
        config.refresh_token_ttl,
    );
    let user = User {
        id: 1,
        username: "testuser".to_string(),
        email: "testuser@example.com".to_string(),
    };
    let pair = service.issue(&user).unwrap();
    (pair.access, pair.refresh)
}

fn access_token() -> String {
    token_pair().0
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn laptop() -> Value {
    json!({
        "name": "Laptop",
        "description": "A high-end gaming laptop",
        "quantity": 10,
        "price": 999.99
    })
}

async fn create_laptop(app: &Router, token: &str) -> i64 {
    let (status, json) = send(app, "POST", "/items", Some(token), Some(laptop())).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_i64().unwrap()
}

// == Item Lifecycle ==

#[tokio::test]
async fn test_item_lifecycle_through_cache() {
    let app = create_test_app();
    let token = access_token();

    let (status, created) = send(&app, "POST", "/items", Some(&token), Some(laptop())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Laptop");
    assert_eq!(created["quantity"], 10);
    assert_eq!(created["price"], "999.99");
    assert!(created["created_at"].is_string());
    let id = created["id"].as_i64().unwrap();
    let item_uri = format!("/items/{id}");

    // First read misses, second is served from the cache
    let (status, fetched) = send(&app, "GET", &item_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    let (status, _) = send(&app, "GET", &item_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = send(&app, "GET", "/cache/stats", None, None).await;
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["store_reads"], 1);
    assert_eq!(stats["backend"]["entries"], 1);
    assert_eq!(stats["backend"]["evictions"], 0);

    // Update is visible immediately despite the cached snapshot
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/items/{id}/update"),
        Some(&token),
        Some(json!({"quantity": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 5);
    assert_eq!(updated["name"], "Laptop");

    let (status, fetched) = send(&app, "GET", &item_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["quantity"], 5);

    // Delete is visible immediately too
    let (status, json) = send(&app, "DELETE", &format!("/items/{id}/delete"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Item deleted successfully");

    let (status, json) = send(&app, "GET", &item_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_missing_item_is_not_cached() {
    let app = create_test_app();
    let token = access_token();

    for _ in 0..2 {
        let (status, _) = send(&app, "GET", "/items/999", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (_, stats) = send(&app, "GET", "/cache/stats", None, None).await;
    assert_eq!(stats["hits"], 0);
    assert_eq!(stats["store_reads"], 2);
}

#[tokio::test]
async fn test_non_integer_id_is_not_found() {
    let app = create_test_app();
    let token = access_token();

    let (status, _) = send(&app, "GET", "/items/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/items/abc/delete", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signed_id_is_not_found() {
    let app = create_test_app();
    let token = access_token();
    let id = create_laptop(&app, &token).await;

    let (status, _) = send(&app, "GET", &format!("/items/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/items/+{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_all_items() {
    let app = create_test_app();
    let token = access_token();

    create_laptop(&app, &token).await;
    let mut phone = laptop();
    phone["name"] = json!("Phone");
    let (status, _) = send(&app, "POST", "/items", Some(&token), Some(phone)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, "GET", "/items/all", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Laptop", "Phone"]);
}

// == Validation ==

#[tokio::test]
async fn test_create_with_missing_fields() {
    let app = create_test_app();
    let token = access_token();

    let (status, json) = send(&app, "POST", "/items", Some(&token), Some(json!({"name": "Laptop"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["quantity"][0], "This field is required.");
    assert_eq!(json["fields"]["price"][0], "This field is required.");
}

#[tokio::test]
async fn test_create_with_duplicate_name() {
    let app = create_test_app();
    let token = access_token();
    create_laptop(&app, &token).await;

    let (status, json) = send(&app, "POST", "/items", Some(&token), Some(laptop())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["name"].is_array());
}

#[tokio::test]
async fn test_invalid_update_leaves_item_unchanged() {
    let app = create_test_app();
    let token = access_token();
    let id = create_laptop(&app, &token).await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/items/{id}/update"),
        Some(&token),
        Some(json!({"quantity": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["quantity"].is_array());

    let (_, fetched) = send(&app, "GET", &format!("/items/{id}"), Some(&token), None).await;
    assert_eq!(fetched["quantity"], 10);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/items")
                .header("authorization", format!("Bearer {}", access_token()))
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Authentication ==

#[tokio::test]
async fn test_item_endpoints_reject_missing_and_invalid_tokens() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/items/all", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json["error"].is_string());

    let (status, _) = send(&app, "GET", "/items/all", Some("not.a.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_cannot_access_items() {
    let app = create_test_app();
    let (_, refresh) = token_pair();

    let (status, _) = send(&app, "GET", "/items/all", Some(&refresh), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_login_refresh_flow() {
    let app = create_test_app();
    let credentials = json!({
        "username": "testuser",
        "email": "testuser@example.com",
        "password": "testpassword"
    });

    let (status, json) = send(&app, "POST", "/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "User created successfully!");

    let (status, json) = send(&app, "POST", "/register", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["username"].is_array());

    let (status, json) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"username": "testuser", "password": "wrongpassword"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json["error"].is_string());

    let (status, tokens) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"username": "testuser", "password": "testpassword"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let access = tokens["access"].as_str().unwrap().to_string();
    let refresh = tokens["refresh"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "GET", "/items/all", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(
        &app,
        "POST",
        "/token/refresh",
        None,
        Some(json!({"refresh": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let renewed = json["access"].as_str().unwrap();

    let (status, _) = send(&app, "GET", "/items/all", Some(renewed), None).await;
    assert_eq!(status, StatusCode::OK);

    // An access token is not a refresh token
    let (status, _) = send(
        &app,
        "POST",
        "/token/refresh",
        None,
        Some(json!({"refresh": access})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({"username": "testuser", "email": "not-an-email", "password": "testpassword"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["email"][0], "Enter a valid email address.");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"username": "nobody", "password": "whatever"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}
