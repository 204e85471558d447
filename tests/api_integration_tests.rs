//! Integration Tests for API Endpoints
//!
//! Drives the full router in-process: CRUD round-trips, search with
//! caching, rate limiting, and the operational endpoints.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use userhub::api::create_router;
use userhub::AppState;

// == Helper Functions ==

fn create_test_app() -> Router {
    // Generous limiter so only the dedicated tests exercise 429s
    let state = AppState::new(100, 100.0, 1000.0, Duration::from_secs(300));
    create_router(state)
}

fn starved_app(burst: f64) -> Router {
    // Tokens refill so slowly the burst is effectively the whole budget
    let state = AppState::new(100, 0.001, burst, Duration::from_secs(300));
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn user_body(name: &str, email: &str, age: u32) -> Body {
    Body::from(format!(
        r#"{{"name":"{name}","email":"{email}","age":{age}}}"#
    ))
}

async fn create_user(app: &Router, name: &str, email: &str, age: u32) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(user_body(name, email, age))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response.into_body()).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let json = body_to_json(response.into_body()).await;
    (status, json)
}

// == CRUD Tests ==

#[tokio::test]
async fn test_create_user_returns_assigned_id() {
    let app = create_test_app();

    let created = create_user(&app, "Ada", "ada@example.com", 36).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["email"], "ada@example.com");
    assert_eq!(created["age"], 36);
}

#[tokio::test]
async fn test_create_user_invalid_payload() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(user_body("", "ada@example.com", 36))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Name"));
}

#[tokio::test]
async fn test_crud_round_trip() {
    let app = create_test_app();

    create_user(&app, "Ada", "ada@example.com", 36).await;

    let (status, fetched) = get(&app, "/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Ada");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/users/1")
                .header("content-type", "application/json")
                .body(user_body("Ada K. Lovelace", "ada@example.com", 37))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_to_json(response.into_body()).await;
    assert_eq!(updated["age"], 37);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = get(&app, "/users/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_user_returns_404_with_error_body() {
    let app = create_test_app();

    let (status, json) = get(&app, "/users/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_list_users_ordered_by_id() {
    let app = create_test_app();

    create_user(&app, "Ada", "ada@example.com", 36).await;
    create_user(&app, "Grace", "grace@example.com", 85).await;

    let (status, json) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);

    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], 1);
    assert_eq!(users[1]["id"], 2);
}

// == Search Tests ==

#[tokio::test]
async fn test_search_filters_and_paginates() {
    let app = create_test_app();

    create_user(&app, "Ada Lovelace", "ada@example.com", 36).await;
    create_user(&app, "Grace Hopper", "grace@example.com", 85).await;
    create_user(&app, "Alan Turing", "alan@example.org", 41).await;

    let (status, json) = get(&app, "/users/search?search=ada&search_by=name").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Ada Lovelace");
    assert_eq!(json["pagination"]["total_items"], 1);
    assert_eq!(json["pagination"]["current_page"], 1);
    assert_eq!(json["pagination"]["has_next"], false);
}

#[tokio::test]
async fn test_search_sorting_and_paging_metadata() {
    let app = create_test_app();

    create_user(&app, "Ada", "ada@example.com", 36).await;
    create_user(&app, "Grace", "grace@example.com", 85).await;
    create_user(&app, "Alan", "alan@example.org", 41).await;

    let (status, json) =
        get(&app, "/users/search?sort_by=age&sort_order=desc&page=1&page_size=2").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["data"][0]["age"], 85);
    assert_eq!(json["data"][1]["age"], 41);
    assert_eq!(json["pagination"]["total_pages"], 2);
    assert_eq!(json["pagination"]["has_next"], true);
}

#[tokio::test]
async fn test_search_responses_are_cached() {
    let app = create_test_app();

    create_user(&app, "Ada", "ada@example.com", 36).await;

    let uri = "/users/search?search=ada&search_by=name";
    let (_, first) = get(&app, uri).await;
    let (_, second) = get(&app, uri).await;
    assert_eq!(first, second);

    let (_, metrics) = get(&app, "/metrics").await;
    assert_eq!(metrics["cache"]["miss_count"], 1);
    assert_eq!(metrics["cache"]["hit_count"], 1);
    assert_eq!(metrics["cache"]["size"], 1);
}

#[tokio::test]
async fn test_distinct_search_params_use_distinct_cache_entries() {
    let app = create_test_app();

    create_user(&app, "Ada", "ada@example.com", 36).await;

    get(&app, "/users/search?page=1").await;
    get(&app, "/users/search?page=2").await;

    let (_, metrics) = get(&app, "/metrics").await;
    assert_eq!(metrics["cache"]["miss_count"], 2);
    assert_eq!(metrics["cache"]["size"], 2);
}

// == Rate Limiting Tests ==

#[tokio::test]
async fn test_rate_limit_rejects_after_burst() {
    // In-process requests carry no peer address, so they all share one
    // identity and one bucket
    let app = starved_app(2.0);

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(json["error"].as_str().unwrap().contains("Rate limit"));
}

#[tokio::test]
async fn test_rate_limit_isolates_identities() {
    let app = starved_app(1.0);

    let request = |ip: &str| {
        Request::builder()
            .uri("/health")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(request("203.0.113.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A different client still has its own full bucket
    let response = app.clone().oneshot(request("203.0.113.2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The first client's bucket is drained
    let response = app.clone().oneshot(request("203.0.113.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limited_request_never_reaches_handler() {
    let app = starved_app(1.0);

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    // This create is rejected by the middleware, so no user is stored
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(user_body("Ada", "ada@example.com", 36))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

// == Operational Endpoints ==

#[tokio::test]
async fn test_health_endpoint_payload() {
    let app = create_test_app();

    create_user(&app, "Ada", "ada@example.com", 36).await;

    let (status, json) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["user_count"], 1);
    assert!(json["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_metrics_endpoint_payload() {
    let app = create_test_app();

    let (status, json) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cache"]["hit_count"], 0);
    assert_eq!(json["cache"]["miss_count"], 0);
    assert_eq!(json["cache"]["hit_rate"], 0.0);
    assert_eq!(json["cache"]["max_size"], 100);
    // Every request so far came from the single in-process identity
    assert_eq!(json["rate_limiter"]["tracked_identities"], 1);
}
