#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Mock providers and factories so the generation flow can be exercised
//! without network access, while still recording every call that would have
//! gone out.

use async_trait::async_trait;
use comms911::providers::ai::{AiProvider, Embedder};
use comms911::providers::factory::ProviderFactory;
use comms911::PromptError;
use dotenvy::dotenv;
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt::try_init();
    });
}

// --- Mock AI Provider ---

/// Replays scripted responses. `Err(message)` entries become `PromptError::AiApi`.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
    pub responses: Arc<RwLock<Vec<Result<String, String>>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_history.read().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, String)> {
        self.call_history.read().unwrap().last().cloned()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, PromptError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        match self.responses.write().unwrap().pop() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(PromptError::AiApi(message)),
            None => Ok("Default mock response".to_string()),
        }
    }
}

// --- Mock Embedder ---

/// Embeds text as the count of each vocabulary word it contains.
#[derive(Clone, Debug)]
pub struct MockEmbedder {
    vocabulary: Vec<String>,
    pub calls: Arc<RwLock<Vec<String>>>,
}

impl MockEmbedder {
    pub fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.to_lowercase()).collect(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PromptError> {
        self.calls.write().unwrap().push(text.to_string());
        let lowered = text.to_lowercase();
        Ok(self
            .vocabulary
            .iter()
            .map(|word| lowered.matches(word.as_str()).count() as f32)
            .collect())
    }
}

// --- Mock Provider Factory ---

/// Hands out clones of one [`MockAiProvider`] and [`MockEmbedder`].
#[derive(Clone, Debug)]
pub struct MockProviderFactory {
    pub provider: MockAiProvider,
    pub embedder: MockEmbedder,
    /// When set, every `create_*` call fails with `PromptError::AiAuth`.
    pub init_error: Option<String>,
    pub created: Arc<RwLock<usize>>,
}

impl MockProviderFactory {
    pub fn new(provider: MockAiProvider) -> Self {
        Self {
            provider,
            embedder: MockEmbedder::new(&[]),
            init_error: None,
            created: Arc::new(RwLock::new(0)),
        }
    }

    pub fn with_embedder(mut self, embedder: MockEmbedder) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn failing(message: &str) -> Self {
        let mut factory = Self::new(MockAiProvider::new(vec![]));
        factory.init_error = Some(message.to_string());
        factory
    }

    pub fn created_count(&self) -> usize {
        *self.created.read().unwrap()
    }
}

impl ProviderFactory for MockProviderFactory {
    fn create_provider(&self, _api_key: &str) -> Result<Box<dyn AiProvider>, PromptError> {
        *self.created.write().unwrap() += 1;
        if let Some(message) = &self.init_error {
            return Err(PromptError::AiAuth(message.clone()));
        }
        Ok(Box::new(self.provider.clone()))
    }

    fn create_embedder(&self, _api_key: &str) -> Result<Box<dyn Embedder>, PromptError> {
        *self.created.write().unwrap() += 1;
        if let Some(message) = &self.init_error {
            return Err(PromptError::AiAuth(message.clone()));
        }
        Ok(Box::new(self.embedder.clone()))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
