//! # Document Q&A Handler

use super::{credential, wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

// --- API Payloads ---

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

// --- Handlers ---

/// Answers a question about the documents processed in a Q&A session.
pub async fn ask_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    debug_params: Query<DebugParams>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<ApiResponse<AskResponse>>, AppError> {
    if payload.question.trim().is_empty() {
        return Err(AppError::BadRequest("Please enter a question.".to_string()));
    }

    let handle = app_state.session(id).await?;
    let mut session = handle.lock().await;
    let qa = session.qa_mut()?;
    let mode = qa.mode();

    let key = credential(&headers);
    let answer = app_state
        .document_qa()
        .ask(qa, &payload.question, key.as_deref())
        .await?;

    Ok(wrap_response(
        AskResponse { answer },
        debug_params,
        Some(json!({ "mode": mode, "model": app_state.factory.model_name() })),
    ))
}
