use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Upper bound for one document upload request.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/policies", get(handlers::list_policies_handler))
        .route("/policies/{kind}", get(handlers::policy_catalog_handler))
        .route("/sessions", post(handlers::create_session_handler))
        .route(
            "/sessions/{id}",
            get(handlers::session_status_handler).delete(handlers::delete_session_handler),
        )
        .route("/sessions/{id}/clear", post(handlers::clear_session_handler))
        .route(
            "/sessions/{id}/documents",
            post(handlers::upload_documents_handler)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/sessions/{id}/generate",
            post(handlers::generate_section_handler),
        )
        .route("/sessions/{id}/sections", get(handlers::list_sections_handler))
        .route(
            "/sessions/{id}/sections/{tag}",
            put(handlers::edit_section_handler),
        )
        .route("/sessions/{id}/export", get(handlers::export_draft_handler))
        .route("/sessions/{id}/draft", get(handlers::preview_draft_handler))
        .route("/sessions/{id}/import", post(handlers::import_draft_handler))
        .route("/sessions/{id}/ask", post(handlers::ask_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
