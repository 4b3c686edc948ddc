use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
};

use crate::modules::timesheets::adapters::inbound::http::dto::{
    IdResponse, TimesheetBody, TimesheetDetail, TimesheetListItem, TimesheetQuery, resource_id,
};
use crate::modules::timesheets::adapters::inbound::http::error::ApiError;
use crate::modules::timesheets::core::timesheet::TimesheetFilter;
use crate::shared::infrastructure::http::envelope::{ApiResponse, ResponseMeta};
use crate::shell::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<TimesheetBody>, JsonRejection>,
) -> Result<ApiResponse, ApiError> {
    let Json(body) = body?;
    let mut timesheet = body.into_timesheet(0);
    let id = state.service.create_timesheet(&mut timesheet).await?;
    Ok(ApiResponse::created(IdResponse { id }, "Timesheet created"))
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<TimesheetQuery>, QueryRejection>,
) -> Result<ApiResponse, ApiError> {
    let Query(query) = query?;
    let filter = TimesheetFilter::from(query);
    let timesheets = state.service.list_timesheets(&filter).await?;
    let items: Vec<TimesheetListItem> = timesheets.iter().map(TimesheetListItem::from).collect();
    let total = items.len();
    Ok(ApiResponse::ok(items, "Success").with_meta(ResponseMeta { total }))
}

pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse, ApiError> {
    let id = resource_id(path)?;
    let timesheet = state.service.get_timesheet(id).await?;
    let stats = state.service.stats(id).await?;
    Ok(ApiResponse::ok(
        TimesheetDetail::new(&timesheet, stats),
        "Success",
    ))
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<TimesheetBody>, JsonRejection>,
) -> Result<ApiResponse, ApiError> {
    let id = resource_id(path)?;
    let Json(body) = body?;
    state
        .service
        .update_timesheet(&body.into_timesheet(id))
        .await?;
    Ok(ApiResponse::ok(IdResponse { id }, "Timesheet updated"))
}

pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse, ApiError> {
    let id = resource_id(path)?;
    state.service.delete_timesheet(id).await?;
    Ok(ApiResponse::no_content())
}
