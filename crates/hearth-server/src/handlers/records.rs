//! Record handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::JsonRejection, Path, Query, State},
    response::Redirect,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use hearth_core::models::{parse_record_date, NewRecord, Record, RecordKind, RecordSummary};

/// Query parameters for looking up one day
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: String,
}

/// Query parameters for the recent listing
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}

fn default_recent_limit() -> i64 {
    10
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Fields posted by the HTML entry form
#[derive(Debug, Deserialize)]
pub struct AddRecordForm {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub title: String,
    pub amount: i64,
    #[serde(default)]
    pub category: String,
}

/// GET /api/records?date=YYYY-MM-DD - Records on one day
pub async fn get_records_by_date(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateQuery>,
) -> Result<Json<Vec<Record>>, AppError> {
    let date = params.date.trim();
    parse_record_date(date).map_err(AppError::from_core)?;

    let records = state.db.find_records_by_date(date)?;
    Ok(Json(records))
}

/// GET /api/records/all - Date/kind/amount of every record (calendar view)
pub async fn list_all_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecordSummary>>, AppError> {
    let records = state.db.list_all_records()?;
    Ok(Json(records))
}

/// GET /api/records/recent - Most recent records, newest first
pub async fn list_recent_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Vec<Record>>, AppError> {
    // Input validation: clamp limit
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);

    let records = state.db.list_recent_records(limit)?;
    Ok(Json(records))
}

/// POST /api/records - Add a record
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewRecord>, JsonRejection>,
) -> Result<Json<CreatedResponse>, AppError> {
    let Json(record) = payload.map_err(|e| AppError::bad_request(&e.body_text()))?;

    let record = record.normalize();
    record.validate().map_err(AppError::from_core)?;

    let id = state.db.insert_record(&record)?;
    Ok(Json(CreatedResponse { id }))
}

/// DELETE /api/records/:id - Delete a record
///
/// Succeeds whether or not the record existed.
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_record(id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /add - Add a record from the HTML form, then back to the index
pub async fn add_record_form(
    State(state): State<Arc<AppState>>,
    form: Result<Form<AddRecordForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form.map_err(|e| AppError::bad_request(&e.body_text()))?;

    let record = NewRecord::new(&form.date, form.kind, &form.title, form.amount)
        .with_category(&form.category)
        .normalize();
    record.validate().map_err(AppError::from_core)?;

    state.db.insert_record(&record)?;
    Ok(Redirect::to("/"))
}
