//! # Reference Text Extraction
//!
//! Uploaded documents are reduced to one block of plain text that later serves
//! as the optional context of every prompt. The file-format specific work is done
//! by a [`TextExtractor`] plugin (see the `comms911-pdf` crate).

pub mod traits;
pub mod types;

pub use traits::{IngestError, TextExtractor};
pub use types::{DocumentFailure, ExtractedText, UploadedDocument};

use tracing::{info, instrument, warn};

/// Placed between the text of consecutive documents.
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Extracts every document in upload order.
///
/// A document that fails to parse is recorded in `failures` and skipped; the
/// documents around it are still used. Documents that parse but contain no text
/// contribute nothing.
#[instrument(skip_all, fields(documents = documents.len()))]
pub async fn extract_documents(
    extractor: &dyn TextExtractor,
    documents: &[UploadedDocument],
) -> ExtractedText {
    let mut parts: Vec<String> = Vec::with_capacity(documents.len());
    let mut failures = Vec::new();

    for document in documents {
        match extractor.extract_text(document).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    warn!("Document '{}' contains no extractable text.", document.name);
                } else {
                    parts.push(trimmed.to_string());
                }
            }
            Err(e) => {
                warn!("Failed to extract text from '{}': {}", document.name, e);
                failures.push(DocumentFailure {
                    document: document.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let extracted = ExtractedText {
        text: parts.join(DOCUMENT_SEPARATOR),
        failures,
        documents_processed: documents.len(),
    };
    info!(
        "Extracted {} characters from {} documents ({} failed).",
        extracted.char_count(),
        extracted.documents_processed,
        extracted.failures.len()
    );
    extracted
}
