//! # Session Handlers
//!
//! Sessions hold one user's working state: the reference text and generated
//! sections of a policy draft, or the processed documents of a Q&A session.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::{
    state::Session,
    types::{MessageResponse, SessionInfo, SessionKind},
};
use comms911::qa::QaMode;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// --- API Payloads ---

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub kind: SessionKind,
    /// Only meaningful for Q&A sessions.
    #[serde(default)]
    pub qa_mode: Option<QaMode>,
}

#[derive(Serialize, Deserialize)]
pub struct SessionStatus {
    pub kind: SessionKind,
    /// Characters of reference text (policy) or processed text (Q&A).
    pub context_characters: usize,
    /// Tags of the generated sections, in export order. Empty for Q&A.
    pub sections: Vec<String>,
    /// Whether a Q&A session is ready for questions. Always false for policy.
    pub processed: bool,
}

// --- Handlers ---

pub async fn create_session_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionInfo>>), AppError> {
    if payload.qa_mode.is_some() && payload.kind != SessionKind::Qa {
        return Err(AppError::BadRequest(
            "qa_mode only applies to Q&A sessions.".to_string(),
        ));
    }
    let info = app_state
        .create_session(payload.kind, payload.qa_mode)
        .await?;
    Ok((
        StatusCode::CREATED,
        wrap_response(info, debug_params, None),
    ))
}

pub async fn session_status_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<SessionStatus>>, AppError> {
    let handle = app_state.session(id).await?;
    let session = handle.lock().await;
    let status = match &*session {
        Session::Policy(ctx) => SessionStatus {
            kind: session.kind(),
            context_characters: ctx.reference_text().map_or(0, |t| t.chars().count()),
            sections: ctx
                .results()
                .tags()
                .into_iter()
                .map(str::to_string)
                .collect(),
            processed: false,
        },
        Session::Qa(qa) => SessionStatus {
            kind: SessionKind::Qa,
            context_characters: qa.document_text().map_or(0, |t| t.chars().count()),
            sections: Vec::new(),
            processed: qa.is_processed(),
        },
    };
    Ok(wrap_response(status, debug_params, None))
}

pub async fn delete_session_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    app_state.remove_session(id).await?;
    info!(session_id = %id, "Deleted session.");
    Ok(wrap_response(
        MessageResponse {
            message: "Session deleted.".to_string(),
        },
        debug_params,
        None,
    ))
}

/// Wipes the session's context and results but keeps the session itself.
pub async fn clear_session_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let handle = app_state.session(id).await?;
    let mut session = handle.lock().await;
    match &mut *session {
        Session::Policy(ctx) => ctx.clear(),
        Session::Qa(qa) => qa.clear(),
    }
    Ok(wrap_response(
        MessageResponse {
            message: "Session data cleared.".to_string(),
        },
        debug_params,
        None,
    ))
}
