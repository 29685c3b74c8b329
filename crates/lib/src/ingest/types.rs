use crate::errors::GenerationError;
use serde::Serialize;

/// A file as received from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A document that could not be read. Siblings in the same batch are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub document: String,
    pub reason: String,
}

impl From<DocumentFailure> for GenerationError {
    fn from(failure: DocumentFailure) -> Self {
        GenerationError::ExtractionFailure {
            document: failure.document,
            reason: failure.reason,
        }
    }
}

/// The outcome of extracting a batch of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    /// The text of every readable document, in upload order.
    pub text: String,
    pub failures: Vec<DocumentFailure>,
    /// How many documents were submitted, readable or not.
    pub documents_processed: usize,
}

impl ExtractedText {
    /// The extracted text, or `None` when nothing readable came out of the batch.
    pub fn usable_text(&self) -> Option<&str> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
