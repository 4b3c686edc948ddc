// JSON envelope wrapped around every API response.
//
// Shape: {success, code, status, message, data?, error?, meta?}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub field: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: "validation_error".into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseMeta {
    pub total: usize,
}

#[derive(Debug, Serialize)]
struct Body {
    success: bool,
    code: u16,
    status: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<ResponseMeta>,
}

#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    message: String,
    data: Option<Value>,
    error: Option<Value>,
    meta: Option<ResponseMeta>,
}

impl ApiResponse {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
            error: None,
            meta: None,
        }
    }

    pub fn ok(data: impl Serialize, message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message).with_data(data)
    }

    pub fn created(data: impl Serialize, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CREATED, message).with_data(data)
    }

    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, "No Content")
    }

    pub fn bad_request(details: Vec<ErrorDetail>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message).with_error(details)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unprocessable(details: Vec<ErrorDetail>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message).with_error(details)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn with_meta(mut self, meta: ResponseMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn with_data(mut self, data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => self.data = Some(value),
            Err(err) => {
                error!(error = %err, "response payload serialization failed");
                return Self::internal("Internal error");
            }
        }
        self
    }

    fn with_error(mut self, details: Vec<ErrorDetail>) -> Self {
        self.error = serde_json::to_value(details).ok();
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        let body = Body {
            success: self.status.is_success(),
            code: self.status.as_u16(),
            status: self.status.canonical_reason().unwrap_or_default(),
            message: self.message,
            data: self.data,
            error: self.error,
            meta: self.meta,
        };
        (self.status, Json(body)).into_response()
    }
}
