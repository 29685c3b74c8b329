//! # API Route Handlers
//!
//! One sub-module per resource: the policy catalogue, sessions, uploaded
//! documents, section generation, drafts and Q&A. Everything is re-exported
//! here for the router.

pub mod document_handlers;
pub mod draft_handlers;
pub mod general;
pub mod generation_handlers;
pub mod policy_handlers;
pub mod qa_handlers;
pub mod session_handlers;

pub use document_handlers::*;
pub use draft_handlers::*;
pub use general::*;
pub use generation_handlers::*;
pub use policy_handlers::*;
pub use qa_handlers::*;
pub use session_handlers::*;

use super::{
    errors::AppError,
    state::AppState,
    types::{ApiResponse, DebugParams},
};
use axum::{extract::Query, http::HeaderMap, Json};
use serde_json::Value;

/// The request header carrying the caller's API key. It is read per request
/// and never stored.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Wraps `result` in an `ApiResponse`, attaching `debug_info` only when the
/// caller asked for it with `?debug=true`.
pub(crate) fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}

/// The credential sent with the request, if any.
pub(crate) fn credential(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
