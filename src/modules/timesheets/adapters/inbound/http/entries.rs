use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
};

use crate::modules::timesheets::adapters::inbound::http::dto::{EntryBody, IdResponse, resource_id};
use crate::modules::timesheets::adapters::inbound::http::error::ApiError;
use crate::shared::infrastructure::http::envelope::ApiResponse;
use crate::shell::state::AppState;

pub async fn add(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<EntryBody>, JsonRejection>,
) -> Result<ApiResponse, ApiError> {
    let timesheet_id = resource_id(path)?;
    let Json(body) = body?;
    if body.date.as_deref().is_none_or(str::is_empty) {
        return Err(ApiError::InvalidPayload("missing field `date`".into()));
    }
    let draft = body.into_draft()?;
    let id = state.service.add_entry(timesheet_id, draft).await?;
    Ok(ApiResponse::created(IdResponse { id }, "Entry created"))
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<EntryBody>, JsonRejection>,
) -> Result<ApiResponse, ApiError> {
    let id = resource_id(path)?;
    let Json(body) = body?;
    state.service.update_entry(id, body.into_draft()?).await?;
    Ok(ApiResponse::ok(IdResponse { id }, "Entry updated"))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse, ApiError> {
    let id = resource_id(path)?;
    state.service.delete_entry(id).await?;
    Ok(ApiResponse::no_content())
}
