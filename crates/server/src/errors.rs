use comms911::{store::StoreError, GenerationError, ServiceFailureKind};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The discriminated outcome of a generation, extraction or Q&A action.
    Generation(GenerationError),
    /// The request body or path was not usable.
    BadRequest(String),
    /// No session with this id exists.
    SessionNotFound(Uuid),
    /// The session exists but serves a different workflow.
    WrongSessionKind { expected: &'static str },
    /// The session has no section with this tag.
    SectionNotFound(String),
    /// An export was requested before any section was generated.
    NothingToExport,
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, code, error_message) = match self {
            AppError::Generation(err) => {
                warn!("GenerationError: {:?}", err);
                let status = match &err {
                    GenerationError::CredentialMissing | GenerationError::ServiceInitFailure(_) => {
                        StatusCode::UNAUTHORIZED
                    }
                    GenerationError::ServiceCallFailure {
                        kind: ServiceFailureKind::ContextWindowExceeded,
                        ..
                    } => StatusCode::PAYLOAD_TOO_LARGE,
                    GenerationError::ServiceCallFailure { .. } => StatusCode::BAD_GATEWAY,
                    GenerationError::NoUsableContext | GenerationError::NotProcessedYet(_) => {
                        StatusCode::CONFLICT
                    }
                    GenerationError::ExtractionFailure { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, err.code(), err.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                "session_not_found",
                format!("Session '{id}' not found."),
            ),
            AppError::WrongSessionKind { expected } => (
                StatusCode::CONFLICT,
                "wrong_session_kind",
                format!("This action requires a {expected} session."),
            ),
            AppError::SectionNotFound(tag) => (
                StatusCode::NOT_FOUND,
                "section_not_found",
                format!("No generated section named '{tag}'."),
            ),
            AppError::NothingToExport => (
                StatusCode::CONFLICT,
                "nothing_to_export",
                "No sections have been generated yet.".to_string(),
            ),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": code,
        }));

        (status_code, body).into_response()
    }
}
