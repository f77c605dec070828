use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use talentflow_backend::{config::Config, database::memory::MemoryStore, routes, AppState};
use tower::ServiceExt;

pub fn app() -> Router {
    let config = Config {
        api_rps: 10_000,
        ..Config::default()
    };
    let state = AppState::new(Arc::new(config), Arc::new(MemoryStore::new()));
    routes::router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn create_job(app: &Router, title: &str) -> JsonValue {
    let (status, job) = send(
        app,
        "POST",
        "/api/jobs",
        Some(serde_json::json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    job
}

#[allow(dead_code)]
pub async fn create_candidate(app: &Router, job_id: i64, email: &str) -> JsonValue {
    let (status, candidate) = send(
        app,
        "POST",
        "/api/candidates",
        Some(serde_json::json!({ "jobId": job_id, "name": "Ada Lovelace", "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    candidate
}
