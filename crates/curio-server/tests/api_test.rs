//! REST API integration tests.
//!
//! Exercises the router end to end with in-process requests; the
//! WebSocket side is covered by the curio-live unit tests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use curio_server::{create_router, AppState, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::from_config(&ServerConfig::default()).unwrap();
    create_router(state)
}

async fn body_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_list_items_returns_seed() {
    let response = app().oneshot(get("/api/items")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let items = body_json(response.into_body()).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "item1");
    assert_eq!(items[0]["price"], "500.0");
}

#[tokio::test]
async fn test_get_unknown_item_is_404() {
    let response = app().oneshot(get("/api/items/ghost")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_offer_accept_and_reject() {
    let app = app();

    // Equal to the current price: rejected, strict > required
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items/item1/offers",
            json!({"bidder": "alice", "amount": 500.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["currentPrice"], 500.0);

    // Above the current price: accepted, amount as a string this time
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items/item1/offers",
            json!({"bidder": "bob", "amount": "600.0"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["newPrice"], 600.0);

    // The new price is visible on the read side
    let response = app.oneshot(get("/api/items/item1")).await.unwrap();
    let body = body_json(response.into_body()).await;
    assert_eq!(body["price"], "600.0");
}

#[tokio::test]
async fn test_invalid_offers() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items/item1/offers",
            json!({"bidder": "carol", "amount": "abc"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "amount must be numeric and > 0");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items/item1/offers",
            json!({"amount": 700}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "missing bidder");

    let response = app
        .oneshot(post_json(
            "/api/items/ghost/offers",
            json!({"bidder": "dave", "amount": 700}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_item() {
    let app = app();

    // Generated id
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items",
            json!({"name": "Tin Robot", "description": "Wind-up, 1960s", "price": "75"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response.into_body()).await;
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["name"], "Tin Robot");

    // Fixed id conflicts with the seed
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/items",
            json!({"id": "item1", "name": "Duplicate", "price": 10}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Non-positive price is invalid
    let response = app
        .oneshot(post_json(
            "/api/items",
            json!({"name": "Freebie", "price": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_index_page_served() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Curio Marketplace"));
}
