use super::types::UploadedDocument;
use async_trait::async_trait;
use thiserror::Error;

/// A generic error type for all extraction plugins.
///
/// Each plugin maps its specific errors (e.g., a malformed PDF cross-reference
/// table) into these variants, so one failed document can be reported without
/// the core knowing the file format.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to parse the document: {0}")]
    Parse(String),

    #[error("An unexpected internal error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

/// The contract for a plugin that turns uploaded files into plain text.
///
/// Implementations handle a single document; batching and per-document failure
/// bookkeeping live in [`super::extract_documents`].
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the text of every page, in page order.
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, IngestError>;
}
