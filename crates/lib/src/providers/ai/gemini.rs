//! # Gemini Provider
//!
//! Calls the `generateContent` endpoint of the Gemini API. The system
//! instruction is sent in its own field rather than as a chat turn. The key
//! travels in the `x-goog-api-key` header and must never appear in the URL.

use crate::{
    errors::PromptError,
    providers::ai::{classify_api_error, AiProvider},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Turn<'a>,
    contents: [Turn<'a>; 1],
    generation_config: SamplingConfig,
}

/// One block of content. `role` is omitted for the system instruction.
#[derive(Serialize)]
struct Turn<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [TextPart<'a>; 1],
}

impl<'a> Turn<'a> {
    fn new(role: Option<&'static str>, text: &'a str) -> Self {
        Self {
            role,
            parts: [TextPart { text }],
        }
    }
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SamplingConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenates the parts of the first candidate.
    fn into_text(self) -> Result<String, PromptError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(PromptError::AiApi(
                "Gemini API returned no candidate text".to_string(),
            ));
        }
        Ok(text)
    }
}

/// A provider for the Google Gemini API.
#[derive(Clone)]
pub struct GeminiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    temperature: f32,
}

impl GeminiProvider {
    /// `api_url` is the full `...:generateContent` endpoint of the model.
    pub fn new(api_url: String, api_key: String, temperature: f32) -> Result<Self, PromptError> {
        if api_key.trim().is_empty() {
            return Err(PromptError::MissingApiKey);
        }
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            temperature: temperature.clamp(0.0, 1.0),
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_url", &self.api_url)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let body = GenerateContentRequest {
            system_instruction: Turn::new(None, system_prompt),
            contents: [Turn::new(Some("user"), user_prompt)],
            generation_config: SamplingConfig {
                temperature: self.temperature,
            },
        };

        debug!(api_url = %self.api_url, "--> Requesting Gemini content");
        let response = self
            .client
            .post(&self.api_url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, error_text));
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;
        reply.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = GenerateContentRequest {
            system_instruction: Turn::new(None, "system"),
            contents: [Turn::new(Some("user"), "question")],
            generation_config: SamplingConfig { temperature: 0.4 },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "system");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "question");
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_parts_are_concatenated() {
        let reply: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(reply.into_text().unwrap(), "Hello, world");
    }

    #[test]
    fn test_blank_candidate_is_an_error() {
        let reply: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(matches!(reply.into_text(), Err(PromptError::AiApi(_))));
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let result = GeminiProvider::new("http://localhost".into(), " ".into(), 0.4);
        assert!(matches!(result, Err(PromptError::MissingApiKey)));
    }
}
