#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use coffeehouse::{build_router, open_database, AppState, IN_MEMORY};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh, seeded in-memory database
pub fn seeded_app() -> Router {
    let pool = open_database(IN_MEMORY, 4, true).expect("in-memory database should open");
    build_router(AppState::from_pool(Arc::new(pool)))
}

pub async fn request_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request should complete");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };

    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    request_json(
        app,
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid GET request"),
    )
    .await
}

pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    request_json(app, request).await
}

pub fn assert_problem(problem: &Value, status: u16, title: &str) {
    assert_eq!(problem.get("status").and_then(Value::as_u64), Some(status as u64));
    assert_eq!(problem.get("title").and_then(Value::as_str), Some(title));
    assert!(problem.get("type").and_then(Value::as_str).is_some());
    assert!(problem.get("detail").and_then(Value::as_str).is_some());
    assert!(problem
        .get("correlation_id")
        .and_then(Value::as_str)
        .is_some_and(|id| !id.is_empty()));
}

pub fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_i64))
        .collect()
}
