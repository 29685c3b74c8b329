//! # Draft Handlers
//!
//! Reading, editing, exporting and re-importing the generated sections of a
//! policy session.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use comms911::{constants::EXPORT_CONTENT_TYPE, ResultStore};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- API Payloads ---

#[derive(Deserialize)]
pub struct EditSectionRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct DraftResponse {
    pub file_name: String,
    pub content_type: String,
    pub markdown: String,
}

#[derive(Deserialize)]
pub struct ImportDraftRequest {
    pub markdown: String,
}

#[derive(Serialize, Deserialize)]
pub struct ImportDraftResponse {
    pub sections_loaded: usize,
}

// --- Handlers ---

/// Every generated section, keyed by tag.
pub async fn list_sections_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<ResultStore>>, AppError> {
    let handle = app_state.session(id).await?;
    let mut session = handle.lock().await;
    let results = session.policy_mut()?.results().clone();
    Ok(wrap_response(results, debug_params, None))
}

/// Replaces a section's text verbatim with the user's edit.
pub async fn edit_section_handler(
    State(app_state): State<AppState>,
    Path((id, tag)): Path<(Uuid, String)>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<EditSectionRequest>,
) -> Result<Json<ApiResponse<ResultStore>>, AppError> {
    let handle = app_state.session(id).await?;
    let mut session = handle.lock().await;
    let ctx = session.policy_mut()?;
    if !ctx.edit(&tag, payload.text) {
        return Err(AppError::SectionNotFound(tag));
    }
    Ok(wrap_response(ctx.results().clone(), debug_params, None))
}

/// The full draft as a Markdown file download.
pub async fn export_draft_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let handle = app_state.session(id).await?;
    let mut session = handle.lock().await;
    let ctx = session.policy_mut()?;
    if ctx.results().is_empty() {
        return Err(AppError::NothingToExport);
    }

    let disposition = format!("attachment; filename=\"{}\"", ctx.export_file_name());
    Ok((
        [
            (
                header::CONTENT_TYPE,
                format!("{EXPORT_CONTENT_TYPE}; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        ctx.export(),
    )
        .into_response())
}

/// The full draft as JSON, for previewing.
pub async fn preview_draft_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<DraftResponse>>, AppError> {
    let handle = app_state.session(id).await?;
    let mut session = handle.lock().await;
    let ctx = session.policy_mut()?;
    let draft = DraftResponse {
        file_name: ctx.export_file_name().to_string(),
        content_type: EXPORT_CONTENT_TYPE.to_string(),
        markdown: ctx.export(),
    };
    Ok(wrap_response(draft, debug_params, None))
}

/// Loads a previously exported draft, replacing the current sections.
pub async fn import_draft_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<ImportDraftRequest>,
) -> Result<Json<ApiResponse<ImportDraftResponse>>, AppError> {
    let handle = app_state.session(id).await?;
    let mut session = handle.lock().await;
    let sections_loaded = session.policy_mut()?.import(&payload.markdown)?;
    Ok(wrap_response(
        ImportDraftResponse { sections_loaded },
        debug_params,
        None,
    ))
}
