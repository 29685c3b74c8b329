use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised while talking to an AI provider.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider rejected the credential: {0}")]
    AiAuth(String),
    #[error("Request exceeds the model's context window: {0}")]
    ContextWindowExceeded(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
}

/// Why a call to the generation service failed once it was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceFailureKind {
    /// The request never produced an HTTP response.
    Transport,
    /// The service answered with an error or an unreadable body.
    Service,
    /// The prompt is larger than the model accepts.
    ContextWindowExceeded,
}

impl fmt::Display for ServiceFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceFailureKind::Transport => "transport",
            ServiceFailureKind::Service => "service",
            ServiceFailureKind::ContextWindowExceeded => "context window exceeded",
        };
        f.write_str(label)
    }
}

/// The discriminated failure returned by every generation, extraction and
/// question-answering operation.
///
/// None of these are faults: each one is a message for the user that stands in
/// for the text that could not be produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("API key is missing. Please supply your API key to proceed.")]
    CredentialMissing,
    #[error("Error reading document '{document}': {reason}")]
    ExtractionFailure { document: String, reason: String },
    #[error("Could not extract any text from the uploaded documents.")]
    NoUsableContext,
    #[error("Failed to initialize the generation client: {0}")]
    ServiceInitFailure(String),
    #[error("Generation service call failed ({kind}): {message}")]
    ServiceCallFailure {
        kind: ServiceFailureKind,
        message: String,
    },
    #[error("Cannot {0} before documents have been processed.")]
    NotProcessedYet(String),
}

impl GenerationError {
    /// A stable, machine-readable name for the error category.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::CredentialMissing => "credential_missing",
            GenerationError::ExtractionFailure { .. } => "extraction_failure",
            GenerationError::NoUsableContext => "no_usable_context",
            GenerationError::ServiceInitFailure(_) => "service_init_failure",
            GenerationError::ServiceCallFailure { .. } => "service_call_failure",
            GenerationError::NotProcessedYet(_) => "not_processed_yet",
        }
    }

    /// The text stored in place of a section that could not be generated.
    pub fn stand_in_text(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<PromptError> for GenerationError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::MissingApiKey => GenerationError::CredentialMissing,
            PromptError::ReqwestClientBuild(_)
            | PromptError::AiAuth(_)
            | PromptError::UnsupportedProvider(_)
            | PromptError::MissingAiProvider(_) => {
                GenerationError::ServiceInitFailure(err.to_string())
            }
            PromptError::AiRequest(_) => GenerationError::ServiceCallFailure {
                kind: ServiceFailureKind::Transport,
                message: err.to_string(),
            },
            PromptError::ContextWindowExceeded(_) => GenerationError::ServiceCallFailure {
                kind: ServiceFailureKind::ContextWindowExceeded,
                message: err.to_string(),
            },
            PromptError::AiDeserialization(_) | PromptError::AiApi(_) => {
                GenerationError::ServiceCallFailure {
                    kind: ServiceFailureKind::Service,
                    message: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_error_classification() {
        assert_eq!(
            GenerationError::from(PromptError::MissingApiKey),
            GenerationError::CredentialMissing
        );
        assert!(matches!(
            GenerationError::from(PromptError::AiAuth("bad key".into())),
            GenerationError::ServiceInitFailure(_)
        ));
        assert!(matches!(
            GenerationError::from(PromptError::ContextWindowExceeded("too long".into())),
            GenerationError::ServiceCallFailure {
                kind: ServiceFailureKind::ContextWindowExceeded,
                ..
            }
        ));
        assert!(matches!(
            GenerationError::from(PromptError::AiApi("500".into())),
            GenerationError::ServiceCallFailure {
                kind: ServiceFailureKind::Service,
                ..
            }
        ));
    }

    #[test]
    fn test_stand_in_text_is_prefixed() {
        let err = GenerationError::ServiceInitFailure("boom".into());
        assert_eq!(
            err.stand_in_text(),
            "Error: Failed to initialize the generation client: boom"
        );
    }
}
