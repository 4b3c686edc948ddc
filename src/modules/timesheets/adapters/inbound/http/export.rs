use axum::{
    extract::rejection::PathRejection,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::modules::timesheets::adapters::inbound::http::dto::resource_id;
use crate::modules::timesheets::adapters::inbound::http::error::ApiError;
use crate::modules::timesheets::adapters::outbound::pdf_timesheet_report::{
    content_disposition, render,
};
use crate::modules::timesheets::core::errors::TimesheetError;
use crate::shell::state::AppState;

pub async fn pdf(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let id = resource_id(path)?;
    let timesheet = state.service.get_timesheet(id).await?;
    let disposition = content_disposition(&timesheet);
    let bytes = tokio::task::spawn_blocking(move || render(&timesheet))
        .await
        .map_err(|err| TimesheetError::Backend(format!("pdf rendering failed: {err}")))?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
