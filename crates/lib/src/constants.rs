//! # Shared Constants
//!
//! Defaults shared by the library and the server. Using these constants helps to
//! avoid "magic strings" and keeps the crates consistent.

/// The model used for policy generation unless configuration says otherwise.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.5-flash";

/// Sampling temperature sent with every generation request.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Base URL of the Gemini REST API. The model and method are appended.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The embedding model used by the retrieval variant of document Q&A.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Size of a retrieval chunk, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Characters shared between two consecutive retrieval chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Number of passages retrieved for a question.
pub const DEFAULT_TOP_K: usize = 4;

/// Directory holding the on-disk similarity indexes, one database per session.
pub const DEFAULT_INDEX_DIR: &str = "db/qa_index";

/// Content type of the exported draft policy.
pub const EXPORT_CONTENT_TYPE: &str = "text/markdown";
