//! # Passage Retrieval
//!
//! Supports the retrieval flavour of document Q&A: the reference text is split
//! into overlapping chunks, every chunk is embedded, and a question is answered
//! from the chunks nearest to it. Processing documents always rebuilds the whole
//! index.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryVectorStore;
pub use sqlite::TursoVectorStore;

use crate::{
    errors::{GenerationError, PromptError, ServiceFailureKind},
    providers::ai::Embedder,
};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Embedding request failed: {0}")]
    Embedding(#[from] PromptError),
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),
    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl From<RetrievalError> for GenerationError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::Embedding(e) => e.into(),
            other => GenerationError::ServiceCallFailure {
                kind: ServiceFailureKind::Service,
                message: other.to_string(),
            },
        }
    }
}

/// A chunk of reference text and how close it is to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedChunk {
    pub content: String,
    /// Cosine similarity mapped onto `[0, 1]`; higher is closer.
    pub score: f64,
}

/// Splits text into chunks of at most `chunk_size` characters, each starting
/// `chunk_size - chunk_overlap` characters after the previous one.
///
/// An overlap that does not leave room to advance yields a single chunk.
pub fn chunk_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    if chunk_size == 0 {
        return chunks;
    }
    let chars: Vec<char> = text.chars().collect();
    let mut start = 0;

    while start < chars.len() {
        let end = std::cmp::min(start + chunk_size, chars.len());
        let chunk: String = chars[start..end].iter().collect();
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }

        let next_start = (start + chunk_size).saturating_sub(chunk_overlap);
        if end == chars.len() || next_start <= start {
            break;
        }
        start = next_start;
    }

    chunks
}

/// Storage for chunk embeddings with nearest-neighbour lookup.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Replaces the entire contents of the store.
    async fn replace_all(&self, entries: Vec<(String, Vec<f32>)>) -> Result<(), RetrievalError>;

    /// Returns up to `k` entries ordered from most to least similar.
    async fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<RankedChunk>, RetrievalError>;

    async fn len(&self) -> Result<usize, RetrievalError>;
}

/// The seam between Q&A and whatever finds relevant passages.
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Discards the current index and builds a new one from `chunks`.
    /// Returns the number of chunks indexed.
    async fn rebuild(&self, chunks: Vec<String>) -> Result<usize, RetrievalError>;

    async fn query(&self, text: &str, k: usize) -> Result<Vec<RankedChunk>, RetrievalError>;
}

/// A [`SimilarityIndex`] that embeds through an external service and keeps the
/// vectors in a [`VectorStore`].
#[derive(Debug)]
pub struct EmbeddingIndex {
    embedder: Box<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl EmbeddingIndex {
    pub fn new(embedder: Box<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }
}

#[async_trait]
impl SimilarityIndex for EmbeddingIndex {
    #[instrument(skip_all, fields(chunks = chunks.len()))]
    async fn rebuild(&self, chunks: Vec<String>) -> Result<usize, RetrievalError> {
        let mut entries = Vec::with_capacity(chunks.len());
        // Every embedding is fetched before the store is touched, so a failed
        // rebuild leaves the previous index intact.
        for (i, chunk) in chunks.into_iter().enumerate() {
            debug!("Embedding chunk {}.", i);
            let vector = self.embedder.embed(&chunk).await?;
            entries.push((chunk, vector));
        }
        let count = entries.len();
        self.store.replace_all(entries).await?;
        info!("Rebuilt similarity index with {} chunks.", count);
        Ok(count)
    }

    async fn query(&self, text: &str, k: usize) -> Result<Vec<RankedChunk>, RetrievalError> {
        let vector = self.embedder.embed(text).await?;
        self.store.nearest(&vector, k).await
    }
}
