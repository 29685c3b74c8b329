//! # Embeddings Client
//!
//! Turns a document chunk or a question into a vector for the retrieval
//! variant of document Q&A. Two wire dialects are supported: Gemini's
//! `embedContent` and the OpenAI-compatible `/embeddings` endpoint. The dialect
//! is picked once, from the endpoint URL, when the embedder is built.

use crate::{
    constants::GEMINI_API_BASE,
    errors::PromptError,
    providers::ai::{classify_api_error, Embedder},
};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::{self, Debug};
use tracing::debug;

/// The request and response shape spoken by an embeddings endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmbeddingDialect {
    Gemini,
    OpenAiCompatible,
}

#[derive(Deserialize)]
struct GeminiEmbedding {
    embedding: GeminiValues,
}

#[derive(Deserialize)]
struct GeminiValues {
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct OpenAiEmbeddings {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    embedding: Vec<f32>,
}

impl EmbeddingDialect {
    fn for_url(api_url: &str) -> Self {
        let gemini_host = GEMINI_API_BASE
            .split("/v1")
            .next()
            .unwrap_or(GEMINI_API_BASE);
        if api_url.starts_with(gemini_host) {
            EmbeddingDialect::Gemini
        } else {
            EmbeddingDialect::OpenAiCompatible
        }
    }

    fn body(self, model: &str, input: &str) -> Value {
        match self {
            // Gemini wants the model as a resource name.
            EmbeddingDialect::Gemini => {
                let model = if model.starts_with("models/") {
                    model.to_string()
                } else {
                    format!("models/{model}")
                };
                json!({ "model": model, "content": { "parts": [{ "text": input }] } })
            }
            EmbeddingDialect::OpenAiCompatible => json!({ "model": model, "input": input }),
        }
    }

    fn authorize(self, request: RequestBuilder, api_key: &str) -> RequestBuilder {
        match self {
            EmbeddingDialect::Gemini => request.header("x-goog-api-key", api_key),
            EmbeddingDialect::OpenAiCompatible => request.bearer_auth(api_key),
        }
    }

    fn vector(self, body: &str) -> Result<Vec<f32>, PromptError> {
        let malformed =
            |e: serde_json::Error| PromptError::AiApi(format!("Malformed embeddings response: {e}"));
        match self {
            EmbeddingDialect::Gemini => serde_json::from_str::<GeminiEmbedding>(body)
                .map(|r| r.embedding.values)
                .map_err(malformed),
            EmbeddingDialect::OpenAiCompatible => {
                let parsed: OpenAiEmbeddings = serde_json::from_str(body).map_err(malformed)?;
                parsed
                    .data
                    .into_iter()
                    .next()
                    .map(|d| d.embedding)
                    .ok_or_else(|| PromptError::AiApi("No embedding in response".to_string()))
            }
        }
    }
}

/// An [`Embedder`] calling a remote embeddings endpoint, one text per request.
#[derive(Clone)]
pub struct ApiEmbedder {
    client: ReqwestClient,
    api_url: String,
    model: String,
    api_key: Option<String>,
    dialect: EmbeddingDialect,
}

impl ApiEmbedder {
    pub fn new(api_url: String, model: String, api_key: Option<String>) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        let dialect = EmbeddingDialect::for_url(&api_url);
        Ok(Self {
            client,
            api_url,
            model,
            api_key,
            dialect,
        })
    }
}

impl Debug for ApiEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiEmbedder")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PromptError> {
        let mut request = self
            .client
            .post(&self.api_url)
            .json(&self.dialect.body(&self.model, text));
        if let Some(key) = &self.api_key {
            request = self.dialect.authorize(request, key);
        }

        debug!(dialect = ?self.dialect, chars = text.len(), "--> Requesting embedding");
        let response = request.send().await.map_err(PromptError::AiRequest)?;
        let status = response.status();
        let body = response.text().await.map_err(PromptError::AiDeserialization)?;
        if !status.is_success() {
            return Err(classify_api_error(status, body));
        }
        self.dialect.vector(&body)
    }
}
