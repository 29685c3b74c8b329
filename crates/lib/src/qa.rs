//! # Document Q&A
//!
//! Answers free-form questions about uploaded documents. The question takes the
//! place of a policy section and the document text (whole, or the passages
//! nearest to the question) takes the place of the reference text.

use crate::{
    constants::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_TOP_K},
    errors::GenerationError,
    generator::{invoke, require_credential},
    ingest::ExtractedText,
    prompts::{
        core::{context_or_notice, render_template},
        qa::{QA_SYSTEM_INSTRUCTION, QA_USER_QUERY},
    },
    providers::factory::ProviderFactory,
    retrieval::{chunk_text, EmbeddingIndex, SimilarityIndex, VectorStore},
    types::{GenerationResult, PromptSpec},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// How the context for a question is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QaMode {
    /// The full document text goes into every prompt.
    #[default]
    SingleShot,
    /// Only the top-k chunks nearest to the question go into the prompt.
    Retrieval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalSettings {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Per-user Q&A state.
#[derive(Debug, Clone)]
pub struct QaSession {
    mode: QaMode,
    document_text: Option<String>,
    store: Option<Arc<dyn VectorStore>>,
    processed: bool,
}

impl QaSession {
    pub fn single_shot() -> Self {
        Self {
            mode: QaMode::SingleShot,
            document_text: None,
            store: None,
            processed: false,
        }
    }

    /// A session whose passages are indexed in `store`.
    pub fn retrieval(store: Arc<dyn VectorStore>) -> Self {
        Self {
            mode: QaMode::Retrieval,
            document_text: None,
            store: Some(store),
            processed: false,
        }
    }

    pub fn mode(&self) -> QaMode {
        self.mode
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn document_text(&self) -> Option<&str> {
        self.document_text.as_deref()
    }

    /// Forgets the processed documents. The next question fails until documents
    /// are processed again.
    pub fn clear(&mut self) {
        self.document_text = None;
        self.processed = false;
    }
}

/// Summary of a successful "process documents" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub characters: usize,
    /// Chunks written to the similarity index; zero in single-shot mode.
    pub chunks_indexed: usize,
}

/// Builds the prompt for one question.
pub fn assemble_qa_prompt(question: &str, context: Option<&str>) -> PromptSpec {
    let values = HashMap::from([
        ("context", context_or_notice(context)),
        ("question", question),
    ]);
    PromptSpec {
        system_instruction: render_template(QA_SYSTEM_INSTRUCTION, &values),
        user_query: render_template(QA_USER_QUERY, &values),
    }
}

#[derive(Debug, Clone)]
pub struct DocumentQa {
    factory: Arc<dyn ProviderFactory>,
    settings: RetrievalSettings,
}

impl DocumentQa {
    pub fn new(factory: Arc<dyn ProviderFactory>, settings: RetrievalSettings) -> Self {
        Self { factory, settings }
    }

    /// Makes the extracted documents available for questions.
    ///
    /// In retrieval mode this rebuilds the whole index and needs a credential
    /// for the embedding service.
    #[instrument(skip_all, fields(mode = ?session.mode))]
    pub async fn process(
        &self,
        session: &mut QaSession,
        extracted: &ExtractedText,
        credential: Option<&str>,
    ) -> Result<ProcessReport, GenerationError> {
        let text = extracted
            .usable_text()
            .ok_or(GenerationError::NoUsableContext)?;

        let chunks_indexed = match (&session.mode, &session.store) {
            (QaMode::Retrieval, Some(store)) => {
                let key = require_credential(credential)?;
                let embedder = self.factory.create_embedder(key)?;
                let index = EmbeddingIndex::new(embedder, Arc::clone(store));
                let chunks = chunk_text(
                    text,
                    self.settings.chunk_size,
                    self.settings.chunk_overlap,
                );
                index.rebuild(chunks).await?
            }
            _ => 0,
        };

        session.document_text = Some(text.to_string());
        session.processed = true;
        info!(
            "Processed {} characters for Q&A ({} chunks indexed).",
            extracted.char_count(),
            chunks_indexed
        );
        Ok(ProcessReport {
            characters: extracted.char_count(),
            chunks_indexed,
        })
    }

    /// Answers a question from the processed documents.
    #[instrument(skip_all, fields(mode = ?session.mode))]
    pub async fn ask(
        &self,
        session: &QaSession,
        question: &str,
        credential: Option<&str>,
    ) -> GenerationResult {
        if !session.processed {
            return Err(GenerationError::NotProcessedYet(
                "ask a question".to_string(),
            ));
        }
        let key = require_credential(credential)?;

        let context = match (&session.mode, &session.store) {
            (QaMode::Retrieval, Some(store)) => {
                let embedder = self.factory.create_embedder(key)?;
                let index = EmbeddingIndex::new(embedder, Arc::clone(store));
                let passages = index.query(question, self.settings.top_k).await?;
                info!("Retrieved {} passages for the question.", passages.len());
                Some(
                    passages
                        .into_iter()
                        .map(|p| p.content)
                        .collect::<Vec<_>>()
                        .join("\n\n"),
                )
            }
            _ => session.document_text.clone(),
        };

        let spec = assemble_qa_prompt(question, context.as_deref());
        invoke(self.factory.as_ref(), &spec, Some(key)).await
    }
}
