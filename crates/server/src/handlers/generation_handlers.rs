//! # Section Generation Handler

use super::{credential, wrap_response, ApiResponse, AppError, AppState, DebugParams};
use comms911::{assemble_prompt, GenerationRequest, SectionInputs};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

// --- API Payloads ---

#[derive(Deserialize)]
pub struct GenerateSectionRequest {
    /// A full section title or its short name. Unknown tags use the generic
    /// section guidance.
    pub section: String,
    /// Form field values. Missing fields render as empty text.
    #[serde(default)]
    pub inputs: SectionInputs,
}

#[derive(Serialize, Deserialize)]
pub struct GenerateSectionResponse {
    /// The tag the text is stored under.
    pub section: String,
    pub text: String,
}

// --- Handlers ---

/// Generates one policy section and stores it in the session.
///
/// With `?debug=true` the response also carries the assembled prompt.
pub async fn generate_section_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    debug_params: Query<DebugParams>,
    Json(payload): Json<GenerateSectionRequest>,
) -> Result<Json<ApiResponse<GenerateSectionResponse>>, AppError> {
    if payload.section.trim().is_empty() {
        return Err(AppError::BadRequest(
            "A section must be selected.".to_string(),
        ));
    }
    // Tags become `## {tag}` export headings and must stay on one line.
    if payload.section.contains(['\n', '\r']) {
        return Err(AppError::BadRequest(
            "A section name must be a single line.".to_string(),
        ));
    }

    let handle = app_state.session(id).await?;
    let mut session = handle.lock().await;
    let ctx = session.policy_mut()?;
    let kind = ctx.kind();
    let section = kind.resolve(&payload.section).title;
    info!(%kind, %section, "Generating policy section.");

    let debug_info = if debug_params.debug.unwrap_or(false) {
        let request = GenerationRequest::new(payload.section.as_str())
            .with_inputs(payload.inputs.clone())
            .with_reference_text(ctx.reference_text().map(str::to_string));
        Some(json!({
            "model": app_state.factory.model_name(),
            "prompt": assemble_prompt(kind, &request),
        }))
    } else {
        None
    };

    let key = credential(&headers);
    let text = ctx
        .generate(&app_state.factory, &payload.section, payload.inputs, key.as_deref())
        .await?;

    Ok(wrap_response(
        GenerateSectionResponse { section, text },
        debug_params,
        debug_info,
    ))
}
