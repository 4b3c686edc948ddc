use std::any::Any;

use axum::{
    Router,
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, error, info_span};

use crate::modules::timesheets::adapters::inbound::http::{entries, export, health, timesheets};
use crate::shared::infrastructure::http::envelope::ApiResponse;
use crate::shared::infrastructure::http::request_id::{MakeRequestUuidV7, REQUEST_ID_HEADER};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::check))
        .route("/timesheets", post(timesheets::create).get(timesheets::list))
        .route(
            "/timesheets/{id}",
            get(timesheets::get)
                .put(timesheets::update)
                .delete(timesheets::delete),
        )
        .route("/timesheets/{id}/entries", post(entries::add))
        .route("/timesheets/{id}/export", get(export::pdf))
        .route("/entries/{id}", put(entries::update).delete(entries::delete))
        .fallback(route_not_found)
        .with_state(state);
    with_middleware(routes)
}

/// Outermost first: request id, tracing, id propagation, panic recovery, CORS.
pub fn with_middleware(routes: Router) -> Router {
    routes
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuidV7))
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "handler panicked");
    ApiResponse::internal("Internal server error").into_response()
}

async fn route_not_found() -> ApiResponse {
    ApiResponse::not_found("Route not found")
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use rstest::rstest;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::tests::fixtures::app::{app, empty_request, make_test_state, send};

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_issue_a_request_id_when_absent() {
        let response = app(make_test_state())
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();

        let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_echo_the_callers_request_id() {
        let mut request = empty_request("GET", "/health");
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));

        let response = app(make_test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_panics_with_the_500_envelope() {
        let routes = Router::new().route("/boom", get(boom));
        let app = with_middleware(routes);

        let (status, json) = send(&app, empty_request("GET", "/boom")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], json!("Internal server error"));
        assert_eq!(json["success"], json!(false));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_unknown_routes_with_the_404_envelope() {
        let (status, json) = send(&app(make_test_state()), empty_request("GET", "/nope")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], json!("Route not found"));
    }
}
