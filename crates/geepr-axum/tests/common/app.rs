//! Router and request helpers for geepr-axum tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use geepr_axum::bootstrap::{AxumContext, CorsConfig};
use geepr_axum::routes::create_router;
use geepr_db::CoreFactory;

/// Router over a fresh in-memory catalog.
pub async fn test_app() -> Router {
    let repos = CoreFactory::build_test_repos().await.unwrap();
    create_router(AxumContext::new(repos), &CorsConfig::AllowAll)
}

/// Send one request and decode the JSON response body (`Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// Create a resource and return its id, asserting `201 Created`.
pub async fn create(app: &Router, uri: &str, body: Value) -> String {
    let (status, json) = post(app, uri, body).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
    json["id"].as_str().unwrap().to_string()
}
