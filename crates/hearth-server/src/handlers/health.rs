//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chat_configured: bool,
}

/// GET /api/health - Liveness and chat availability
///
/// Touches the database so a broken store reports as an error.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    state.db.count_records()?;

    Ok(Json(HealthResponse {
        status: "ok",
        chat_configured: state.ai.is_some(),
    }))
}
