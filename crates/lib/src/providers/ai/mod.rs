pub mod embedding;
pub mod gemini;
pub mod local;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
pub use embedding::ApiEmbedder;
use reqwest::StatusCode;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for generating text from a system
/// instruction and a user query using different Large Language Models
/// (e.g., Gemini, OpenAI-compatible local models).
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    ///
    /// The result should be a string containing the AI's response.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// A trait for turning a piece of text into a fixed-dimension vector.
#[async_trait]
pub trait Embedder: Send + Sync + Debug {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PromptError>;
}

/// Maps a non-success response from a provider onto a `PromptError`.
///
/// Credential rejections and context-window overflows get their own variants
/// so callers can tell them apart from ordinary service errors.
pub(crate) fn classify_api_error(status: StatusCode, body: String) -> PromptError {
    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || body.contains("API_KEY_INVALID")
        || body.contains("invalid_api_key")
    {
        return PromptError::AiAuth(body);
    }
    if is_context_overflow(&body) {
        return PromptError::ContextWindowExceeded(body);
    }
    PromptError::AiApi(format!("{status}: {body}"))
}

fn is_context_overflow(body: &str) -> bool {
    let lowered = body.to_lowercase();
    lowered.contains("context_length_exceeded")
        || lowered.contains("maximum context length")
        || lowered.contains("exceeds the maximum number of tokens")
        || lowered.contains("context window")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_failures() {
        let err = classify_api_error(StatusCode::FORBIDDEN, "denied".into());
        assert!(matches!(err, PromptError::AiAuth(_)));

        let body = r#"{"error":{"status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#;
        let err = classify_api_error(StatusCode::BAD_REQUEST, body.into());
        assert!(matches!(err, PromptError::AiAuth(_)));
    }

    #[test]
    fn test_classify_context_overflow() {
        let body = "The input token count (1200000) exceeds the maximum number of tokens allowed (1048576).";
        let err = classify_api_error(StatusCode::BAD_REQUEST, body.into());
        assert!(matches!(err, PromptError::ContextWindowExceeded(_)));
    }

    #[test]
    fn test_classify_generic_error() {
        let err = classify_api_error(StatusCode::INTERNAL_SERVER_ERROR, "oops".into());
        match err {
            PromptError::AiApi(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
