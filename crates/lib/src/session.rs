//! # Policy Session
//!
//! Everything one user accumulates while drafting a manual: the reference text
//! extracted from their documents and the sections generated so far. The caller
//! owns the session; nothing here is shared between users.

use crate::{
    errors::GenerationError,
    generator::PolicyGenerator,
    ingest::{DocumentFailure, ExtractedText},
    policy::PolicyKind,
    providers::factory::ProviderFactory,
    store::{parse_export, ResultStore, StoreError},
    types::{GenerationRequest, GenerationResult, SectionInputs},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// What happened to the reference text after an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceReport {
    /// Characters of reference text now held by the session.
    pub characters: usize,
    pub failures: Vec<DocumentFailure>,
    /// Set when the upload was empty and the reference text was cleared.
    pub warning: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    kind: PolicyKind,
    reference_text: Option<String>,
    results: ResultStore,
}

impl SessionContext {
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            kind,
            reference_text: None,
            results: ResultStore::new(),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Drops the reference text and every generated section.
    pub fn clear(&mut self) {
        info!("Clearing {} session data.", self.kind);
        self.reference_text = None;
        self.results.clear();
    }

    /// Replaces the reference text with the result of an extraction.
    ///
    /// An empty batch clears the reference text and reports a warning. A batch
    /// with no usable text fails with `NoUsableContext` and leaves the previous
    /// reference text in place.
    pub fn load_reference(
        &mut self,
        extracted: ExtractedText,
    ) -> Result<ReferenceReport, GenerationError> {
        if extracted.documents_processed == 0 {
            warn!("No documents uploaded; clearing reference text.");
            self.reference_text = None;
            return Ok(ReferenceReport {
                characters: 0,
                failures: Vec::new(),
                warning: Some("No PDFs uploaded.".to_string()),
                message: "Reference text cleared.".to_string(),
            });
        }

        let Some(text) = extracted.usable_text() else {
            warn!(
                "None of the {} uploaded documents produced usable text.",
                extracted.documents_processed
            );
            return Err(GenerationError::NoUsableContext);
        };

        let characters = extracted.char_count();
        self.reference_text = Some(text.to_string());
        Ok(ReferenceReport {
            characters,
            failures: extracted.failures,
            warning: None,
            message: format!(
                "Successfully loaded {} characters of local context.",
                group_thousands(characters)
            ),
        })
    }

    pub fn reference_text(&self) -> Option<&str> {
        self.reference_text.as_deref()
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    /// Generates one section and stores the outcome under its canonical title.
    ///
    /// Service failures store an `Error: ...` stand-in so the section still
    /// shows up in the draft. A missing credential stores nothing.
    pub async fn generate(
        &mut self,
        factory: &Arc<dyn ProviderFactory>,
        section: &str,
        inputs: SectionInputs,
        credential: Option<&str>,
    ) -> GenerationResult {
        let tag = self.kind.resolve(section).title;
        let request = GenerationRequest::new(section)
            .with_inputs(inputs)
            .with_reference_text(self.reference_text.clone());

        let generator = PolicyGenerator::new(self.kind, Arc::clone(factory));
        let outcome = generator.generate(&request, credential).await;

        match &outcome {
            Ok(text) => self.results.record(tag, text.clone()),
            Err(
                e @ (GenerationError::ServiceInitFailure(_)
                | GenerationError::ServiceCallFailure { .. }),
            ) => self.results.record(tag, e.stand_in_text()),
            Err(_) => {}
        }
        outcome
    }

    /// Replaces a generated section with the user's text, verbatim.
    pub fn edit(&mut self, tag: &str, text: impl Into<String>) -> bool {
        self.results.edit(tag, text)
    }

    /// The full draft as one Markdown document.
    pub fn export(&self) -> String {
        self.results.export_markdown()
    }

    pub fn export_file_name(&self) -> &'static str {
        self.kind.export_file_name()
    }

    /// Replaces every generated section with the sections of a previously
    /// exported draft. Returns the number of sections loaded.
    ///
    /// On a malformed draft the current sections are left untouched.
    pub fn import(&mut self, markdown: &str) -> Result<usize, StoreError> {
        let store = parse_export(markdown)?;
        info!("Imported {} sections into the {} session.", store.len(), self.kind);
        self.results = store;
        Ok(self.results.len())
    }
}

/// Formats `1234567` as `1,234,567`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_empty_upload_clears_reference() {
        let mut session = SessionContext::new(PolicyKind::Tert);
        session
            .load_reference(ExtractedText {
                text: "MOU".to_string(),
                failures: vec![],
                documents_processed: 1,
            })
            .unwrap();
        assert_eq!(session.reference_text(), Some("MOU"));

        let report = session.load_reference(ExtractedText::default()).unwrap();
        assert_eq!(report.warning.as_deref(), Some("No PDFs uploaded."));
        assert_eq!(session.reference_text(), None);
    }

    #[test]
    fn test_unusable_batch_keeps_previous_reference() {
        let mut session = SessionContext::new(PolicyKind::Ng911);
        session
            .load_reference(ExtractedText {
                text: "Existing COOP plan".to_string(),
                failures: vec![],
                documents_processed: 1,
            })
            .unwrap();

        let err = session
            .load_reference(ExtractedText {
                text: String::new(),
                failures: vec![DocumentFailure {
                    document: "scan.pdf".to_string(),
                    reason: "bad xref".to_string(),
                }],
                documents_processed: 1,
            })
            .unwrap_err();
        assert_eq!(err, GenerationError::NoUsableContext);
        assert_eq!(session.reference_text(), Some("Existing COOP plan"));
    }

    #[test]
    fn test_success_message_counts_characters() {
        let mut session = SessionContext::new(PolicyKind::Tert);
        let report = session
            .load_reference(ExtractedText {
                text: "x".repeat(1500),
                failures: vec![],
                documents_processed: 2,
            })
            .unwrap();
        assert_eq!(report.characters, 1500);
        assert_eq!(
            report.message,
            "Successfully loaded 1,500 characters of local context."
        );
    }

    #[test]
    fn test_malformed_import_keeps_sections() {
        let mut session = SessionContext::new(PolicyKind::Tert);
        session
            .import("## Section 1.0: Purpose, Scope, and Authority\n\nImported purpose.")
            .unwrap();
        assert_eq!(session.results().len(), 1);

        let err = session.import("no heading here").unwrap_err();
        assert_eq!(err, StoreError::MissingHeading(0));
        assert_eq!(
            session
                .results()
                .get("Section 1.0: Purpose, Scope, and Authority"),
            Some("Imported purpose.")
        );
    }
}
