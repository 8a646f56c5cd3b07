//! Chat handler

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use hearth_core::advisor::{AdvisorReply, LedgerAdvisor};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/chat - Ask the chat model about the ledger
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<AdvisorReply>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::bad_request(&e.body_text()))?;

    if request.message.trim().is_empty() {
        return Err(AppError::bad_request("Message must not be empty"));
    }

    let client = state
        .ai
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Chat is not configured"))?;

    let advisor = LedgerAdvisor::new(&state.db, client, &state.prompts)
        .with_recent_limit(state.config.chat.recent_limit);

    // Store and prompt problems are ours; anything after this is upstream
    let messages = advisor
        .build_messages(&request.message)
        .map_err(AppError::from_core)?;

    advisor
        .send(&messages)
        .await
        .map(Json)
        .map_err(|e| AppError::bad_gateway("Chat service request failed", e))
}
