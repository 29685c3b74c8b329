//! # comms911-pdf: PDF Text Extraction Plugin
//!
//! This crate reads the text layer of uploaded PDFs (existing local policies,
//! mutual aid agreements) for use as prompt context. It implements the
//! `TextExtractor` trait from `comms911`.

use async_trait::async_trait;
use comms911::ingest::{self, ExtractedText, IngestError, TextExtractor, UploadedDocument};
use pdf::content::{Op, TextDrawAdjusted};
use pdf::file::FileOptions;
use thiserror::Error;
use tracing::{debug, instrument};

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum PdfExtractError {
    #[error("Failed to parse PDF content: {0}")]
    PdfParse(String),
    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<PdfExtractError> for IngestError {
    fn from(err: PdfExtractError) -> Self {
        match err {
            PdfExtractError::PdfParse(s) => IngestError::Parse(s),
            other => IngestError::Internal(anyhow::anyhow!(other.to_string())),
        }
    }
}

// --- Core Extraction Logic ---

/// Placed between the text of consecutive pages.
const PAGE_SEPARATOR: &str = "\n\n";

/// Extracts text from all pages of a PDF synchronously.
///
/// Pages are returned in order, separated by a blank line. Pages without a
/// text layer contribute nothing.
pub fn extract_text_from_pdf(pdf_data: &[u8]) -> Result<String, PdfExtractError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| PdfExtractError::PdfParse(e.to_string()))?;
    let resolver = file.resolver();
    let mut pages = Vec::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| PdfExtractError::PdfParse(e.to_string()))?;
        let mut page_text = String::new();
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| PdfExtractError::PdfParse(e.to_string()))?;
            for op in operations.iter() {
                match op {
                    Op::TextDraw { text } => page_text.push_str(&text.to_string_lossy()),
                    Op::TextDrawAdjusted { array } => {
                        for item in array {
                            if let TextDrawAdjusted::Text(text) = item {
                                page_text.push_str(&text.to_string_lossy());
                            }
                        }
                    }
                    Op::TextNewline | Op::EndText => {
                        if !page_text.is_empty() && !page_text.ends_with('\n') {
                            page_text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
        }
        let trimmed = page_text.trim();
        debug!("Page {} yielded {} characters.", page_num, trimmed.len());
        if !trimmed.is_empty() {
            pages.push(trimmed.to_string());
        }
    }
    Ok(pages.join(PAGE_SEPARATOR))
}

// --- TextExtractor Implementation ---

/// The [`TextExtractor`] for PDF documents. Parsing runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    #[instrument(skip_all, fields(document = %document.name, bytes = document.bytes.len()))]
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, IngestError> {
        let bytes = document.bytes.clone();
        let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
            .await
            .map_err(PdfExtractError::from)??;
        Ok(text)
    }
}

/// Extracts a batch of uploaded PDFs in upload order.
///
/// A corrupt file is reported in the returned failures and does not affect the
/// other files.
pub async fn extract_documents(documents: &[UploadedDocument]) -> ExtractedText {
    ingest::extract_documents(&PdfTextExtractor, documents).await
}
