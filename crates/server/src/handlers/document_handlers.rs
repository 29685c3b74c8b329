//! # Document Upload Handlers
//!
//! Receives reference documents as `multipart/form-data`. For policy sessions
//! the extracted text becomes the reference text of every later prompt; for
//! Q&A sessions it is processed (and indexed, in retrieval mode) for questions.

use super::{credential, wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::state::Session;
use comms911::{
    ingest::{self, DocumentFailure, UploadedDocument},
    session::ReferenceReport,
};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::Multipart;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

// --- API Payloads ---

#[derive(Serialize)]
pub struct ProcessedDocuments {
    pub characters: usize,
    /// Chunks written to the similarity index; zero in single-shot mode.
    pub chunks_indexed: usize,
    pub failures: Vec<DocumentFailure>,
    pub message: String,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum DocumentsResponse {
    Reference(ReferenceReport),
    Processed(ProcessedDocuments),
}

// --- Handlers ---

/// Reads every file part of the upload, in order. Parts without a file name
/// (plain form fields) are ignored.
async fn read_uploads(multipart: &mut Multipart) -> Result<Vec<UploadedDocument>, AppError> {
    let mut documents = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read '{file_name}': {e}")))?;
        info!("Received document '{}' ({} bytes).", file_name, bytes.len());
        documents.push(UploadedDocument::new(file_name, bytes.to_vec()));
    }
    Ok(documents)
}

pub async fn upload_documents_handler(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    debug_params: Query<DebugParams>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<DocumentsResponse>>, AppError> {
    let handle = app_state.session(id).await?;
    let documents = read_uploads(&mut multipart).await?;
    let names: Vec<String> = documents.iter().map(|d| d.name.clone()).collect();

    // Extraction needs no session state, so it runs before taking the lock.
    let extracted = ingest::extract_documents(app_state.extractor.as_ref(), &documents).await;

    let mut session = handle.lock().await;
    let response = match &mut *session {
        Session::Policy(ctx) => DocumentsResponse::Reference(ctx.load_reference(extracted)?),
        Session::Qa(qa) => {
            let key = credential(&headers);
            let report = app_state
                .document_qa()
                .process(qa, &extracted, key.as_deref())
                .await?;
            DocumentsResponse::Processed(ProcessedDocuments {
                characters: report.characters,
                chunks_indexed: report.chunks_indexed,
                failures: extracted.failures,
                message: "Documents processed. You can now ask questions.".to_string(),
            })
        }
    };

    Ok(wrap_response(
        response,
        debug_params,
        Some(json!({ "documents": names })),
    ))
}
