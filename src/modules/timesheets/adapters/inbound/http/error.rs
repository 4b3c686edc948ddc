use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::modules::timesheets::core::errors::TimesheetError;
use crate::shared::infrastructure::http::envelope::{ApiResponse, ErrorDetail};

/// Failure of a timesheet endpoint, rendered as the JSON envelope.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path, query or field value: 400.
    BadRequest {
        field: &'static str,
        message: String,
        summary: String,
    },
    /// Body that is not JSON or misses required fields: 422.
    InvalidPayload(String),
    Domain(TimesheetError),
}

impl ApiError {
    pub fn bad_request(
        field: &'static str,
        message: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self::BadRequest {
            field,
            message: message.into(),
            summary: summary.into(),
        }
    }
}

impl From<TimesheetError> for ApiError {
    fn from(err: TimesheetError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::bad_request("id", "must be a positive integer", "Invalid id")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("query", rejection.body_text(), "Invalid query")
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::BadRequest {
                field,
                message,
                summary,
            } => ApiResponse::bad_request(vec![ErrorDetail::validation(field, message)], summary),
            ApiError::InvalidPayload(message) => ApiResponse::unprocessable(
                vec![ErrorDetail::validation("body", message)],
                "Invalid payload",
            ),
            ApiError::Domain(TimesheetError::InvalidInput(reason)) => ApiResponse::bad_request(
                vec![ErrorDetail::validation("request", reason)],
                "Invalid input",
            ),
            ApiError::Domain(TimesheetError::NotFound) => ApiResponse::not_found("Not found"),
            ApiError::Domain(TimesheetError::Duplicate) => ApiResponse::conflict("Duplicate"),
            ApiError::Domain(TimesheetError::Backend(message)) => {
                error!(error = %message, "timesheet request failed");
                ApiResponse::internal("Internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiResponse::from(self).into_response()
    }
}
