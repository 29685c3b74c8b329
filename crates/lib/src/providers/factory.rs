//! # AI Provider Factory
//!
//! The credential for the generation service belongs to the user and is supplied
//! with every action, so providers are built on demand instead of once at
//! startup. This module holds the configured settings and turns them, plus a
//! credential, into a ready-to-use provider or embedder.

use crate::{
    constants::{DEFAULT_EMBEDDING_MODEL, DEFAULT_GENERATION_MODEL, DEFAULT_TEMPERATURE, GEMINI_API_BASE},
    errors::PromptError,
    providers::ai::{
        gemini::GeminiProvider, local::LocalAiProvider, AiProvider, ApiEmbedder, Embedder,
    },
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::info;

/// The family of API a provider speaks.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint.
    Local,
}

/// Settings for the text-generation service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProviderSettings {
    #[serde(default)]
    pub provider: ProviderKind,
    /// Optional for Gemini, where it is derived from the model name.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_model_name() -> String {
    DEFAULT_GENERATION_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            api_url: None,
            model_name: default_model_name(),
            temperature: default_temperature(),
        }
    }
}

/// Settings for the embedding service used by retrieval Q&A.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EmbeddingSettings {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_embedding_model")]
    pub model_name: String,
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            model_name: default_embedding_model(),
        }
    }
}

/// Builds providers from a caller-held credential.
pub trait ProviderFactory: Send + Sync + Debug {
    /// Creates a text-generation provider authenticated with `api_key`.
    fn create_provider(&self, api_key: &str) -> Result<Box<dyn AiProvider>, PromptError>;

    /// Creates an embedder authenticated with `api_key`.
    fn create_embedder(&self, api_key: &str) -> Result<Box<dyn Embedder>, PromptError>;

    /// The identifier of the generation model, for logging and display.
    fn model_name(&self) -> &str;
}

/// The production [`ProviderFactory`], driven by configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredProviderFactory {
    generation: ProviderSettings,
    embedding: EmbeddingSettings,
}

impl ConfiguredProviderFactory {
    pub fn new(generation: ProviderSettings, embedding: EmbeddingSettings) -> Self {
        Self {
            generation,
            embedding,
        }
    }

    pub fn generation(&self) -> &ProviderSettings {
        &self.generation
    }
}

impl ProviderFactory for ConfiguredProviderFactory {
    fn create_provider(&self, api_key: &str) -> Result<Box<dyn AiProvider>, PromptError> {
        if api_key.trim().is_empty() {
            return Err(PromptError::MissingApiKey);
        }
        let settings = &self.generation;
        match settings.provider {
            ProviderKind::Gemini => {
                let api_url = settings.api_url.clone().unwrap_or_else(|| {
                    format!(
                        "{GEMINI_API_BASE}/{}:generateContent",
                        settings.model_name
                    )
                });
                info!("Configuring Gemini provider with URL: {}", api_url);
                Ok(Box::new(GeminiProvider::new(
                    api_url,
                    api_key.to_string(),
                    settings.temperature,
                )?))
            }
            ProviderKind::Local => {
                let api_url = settings.api_url.clone().ok_or_else(|| {
                    PromptError::MissingAiProvider(
                        "api_url is required for the local provider".to_string(),
                    )
                })?;
                info!("Configuring Local AI provider with URL: {}", api_url);
                Ok(Box::new(LocalAiProvider::new(
                    api_url,
                    api_key.to_string(),
                    settings.model_name.clone(),
                    settings.temperature,
                )?))
            }
        }
    }

    fn create_embedder(&self, api_key: &str) -> Result<Box<dyn Embedder>, PromptError> {
        if api_key.trim().is_empty() {
            return Err(PromptError::MissingApiKey);
        }
        let api_url = match (&self.embedding.api_url, self.generation.provider) {
            (Some(url), _) => url.clone(),
            (None, ProviderKind::Gemini) => format!(
                "{GEMINI_API_BASE}/{}:embedContent",
                self.embedding.model_name
            ),
            (None, ProviderKind::Local) => {
                return Err(PromptError::MissingAiProvider(
                    "embedding.api_url is required for the local provider".to_string(),
                ))
            }
        };
        Ok(Box::new(ApiEmbedder::new(
            api_url,
            self.embedding.model_name.clone(),
            Some(api_key.to_string()),
        )?))
    }

    fn model_name(&self) -> &str {
        &self.generation.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_missing_credential() {
        let factory = ConfiguredProviderFactory::default();
        assert!(matches!(
            factory.create_provider("  "),
            Err(PromptError::MissingApiKey)
        ));
        assert!(matches!(
            factory.create_embedder(""),
            Err(PromptError::MissingApiKey)
        ));
    }

    #[test]
    fn test_local_provider_requires_url() {
        let factory = ConfiguredProviderFactory::new(
            ProviderSettings {
                provider: ProviderKind::Local,
                ..Default::default()
            },
            EmbeddingSettings::default(),
        );
        assert!(matches!(
            factory.create_provider("key"),
            Err(PromptError::MissingAiProvider(_))
        ));
    }

    #[test]
    fn test_defaults_target_gemini_flash() {
        let factory = ConfiguredProviderFactory::default();
        assert_eq!(factory.model_name(), "gemini-2.5-flash");
        assert!(factory.create_provider("key").is_ok());
    }
}
