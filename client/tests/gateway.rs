//! # Gateway Tests
//!
//! `ApiClient` against a real HTTP endpoint served by axum.

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use nearby::core::service::{Gateway, RequestOptions};
use nearby::services::api::ApiClient;
use nearby::AppError;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

async fn spawn_backend(router: Router) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(format!("http://{}", addr))
}

fn backend() -> Router {
    Router::new()
        .route(
            "/auth/signup",
            post(|| async { (StatusCode::CREATED, Json(json!({"token": "abc"}))) }),
        )
        .route(
            "/auth/login",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"detail": "bad email"}))) }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>upstream error</html>") }),
        )
        .route("/users/me/favorites", post(|| async { StatusCode::OK }))
        .route(
            "/echo",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string)
                };
                Json(json!({
                    "authorization": header("authorization"),
                    "content_type": header("content-type"),
                    "content_type_count": headers.get_all("content-type").iter().count(),
                    "body": body,
                }))
            }),
        )
}

#[tokio::test]
async fn test_created_returns_body() {
    let client = spawn_backend(backend()).await;
    let value = client
        .request("/auth/signup", RequestOptions::post().json(&json!({"name": "a"})))
        .await
        .unwrap();
    assert_eq!(value, json!({"token": "abc"}));
}

#[tokio::test]
async fn test_error_detail_becomes_message() {
    let client = spawn_backend(backend()).await;
    let err = client
        .request("/auth/login", RequestOptions::post().json(&json!({})))
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Request("bad email".to_string()));
}

#[tokio::test]
async fn test_unparsable_error_is_generic() {
    let client = spawn_backend(backend()).await;
    let err = client.request("/broken", RequestOptions::get()).await.unwrap_err();
    assert_eq!(err.message(), "Request failed");
}

#[tokio::test]
async fn test_empty_success_is_empty_object() {
    let client = spawn_backend(backend()).await;
    let value = client
        .request("/users/me/favorites?place_id=p1", RequestOptions::post())
        .await
        .unwrap();
    assert_eq!(value, json!({}));
}

#[tokio::test]
async fn test_unknown_route_fails_generically() {
    let client = spawn_backend(backend()).await;
    let err = client.request("/nope", RequestOptions::get()).await.unwrap_err();
    assert_eq!(err.message(), "Request failed");
}

#[tokio::test]
async fn test_headers_are_merged_with_content_type() {
    let client = spawn_backend(backend()).await;
    let headers = HashMap::from([("Authorization".to_string(), "Bearer abc".to_string())]);

    let value = client
        .request(
            "/echo",
            RequestOptions::post().json(&json!({"k": 1})).headers(headers),
        )
        .await
        .unwrap();

    assert_eq!(value["authorization"], "Bearer abc");
    assert_eq!(value["content_type"], "application/json");
    assert_eq!(value["body"], json!({"k": 1}));
}

#[tokio::test]
async fn test_caller_content_type_is_sent_once() {
    let client = spawn_backend(backend()).await;
    let headers = HashMap::from([(
        "Content-Type".to_string(),
        "application/json; charset=utf-8".to_string(),
    )]);

    let value = client
        .request(
            "/echo",
            RequestOptions::post().json(&json!({"k": 1})).headers(headers),
        )
        .await
        .unwrap();

    assert_eq!(value["content_type"], "application/json; charset=utf-8");
    assert_eq!(value["content_type_count"], 1);
}

#[tokio::test]
async fn test_network_failure_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{}", addr));
    let err = client.request("/auth/login", RequestOptions::post()).await.unwrap_err();
    assert!(matches!(err, AppError::Request(ref msg) if msg.starts_with("Network error")));
}
