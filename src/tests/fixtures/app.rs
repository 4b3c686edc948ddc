// Router harness over the in-memory repository.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::modules::timesheets::adapters::outbound::in_memory_timesheet_repository::InMemoryTimesheetRepository;
use crate::modules::timesheets::application::service::TimesheetService;
use crate::shell::http::router;
use crate::shell::state::AppState;

pub fn make_test_state() -> AppState {
    state_over(InMemoryTimesheetRepository::new())
}

pub fn make_offline_state() -> AppState {
    let mut repository = InMemoryTimesheetRepository::new();
    repository.toggle_offline();
    state_over(repository)
}

fn state_over(repository: InMemoryTimesheetRepository) -> AppState {
    AppState {
        service: Arc::new(TimesheetService::new(Arc::new(repository))),
    }
}

pub fn app(state: AppState) -> Router {
    router(state)
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

/// Sends one request and decodes the envelope; `Value::Null` for empty bodies.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, request).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Creates a timesheet through the API and returns its id.
pub async fn create_timesheet(app: &Router, body: &str) -> i64 {
    let (status, json) = send(app, json_request("POST", "/timesheets", body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json["data"]["id"].as_i64().unwrap()
}

pub const BUDI_MARCH: &str = r#"{
    "employee_name": "Budi Santoso",
    "department": "Engineering",
    "month": 3,
    "year": 2024,
    "total_working_days": 21
}"#;
