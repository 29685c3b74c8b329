//! # Policy Generator
//!
//! Turns a [`GenerationRequest`] into a [`PromptSpec`] for one policy manual and
//! sends it to the provider built from the caller's credential.
//!
//! Assembly never fails: unknown section tags use the manual's generic guidance
//! and missing fields render empty. Invocation never panics; every failure comes
//! back as a [`GenerationError`].

use crate::{
    errors::GenerationError,
    policy::PolicyKind,
    prompts::core::{context_or_notice, render_template, POLICY_USER_QUERY},
    providers::factory::ProviderFactory,
    types::{GenerationRequest, GenerationResult, PromptSpec},
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Builds the system instruction and user query for one section.
///
/// The section guidance is rendered from the form fields first and then placed
/// into the base instruction, so user text is substituted exactly once.
pub fn assemble_prompt(kind: PolicyKind, request: &GenerationRequest) -> PromptSpec {
    let section = kind.resolve(&request.section);
    if section.is_fallback() {
        debug!(
            "Section tag '{}' is not in the {} catalogue; using general guidance.",
            request.section, kind
        );
    }

    let mut values: HashMap<&str, &str> = request
        .inputs
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let guidance = render_template(section.guidance_template, &values);

    values.insert("section_title", section.title.as_str());
    values.insert("section_guidance", guidance.as_str());
    values.insert(
        "policy_context",
        context_or_notice(request.reference_text.as_deref()),
    );

    PromptSpec {
        system_instruction: render_template(kind.system_template(), &values),
        user_query: render_template(POLICY_USER_QUERY, &values),
    }
}

/// Returns the trimmed credential, or `CredentialMissing` if there is none.
pub(crate) fn require_credential(credential: Option<&str>) -> Result<&str, GenerationError> {
    match credential.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => {
            warn!("Request made without an API credential.");
            Err(GenerationError::CredentialMissing)
        }
    }
}

/// Sends an assembled prompt to a provider built from `credential`.
///
/// A missing or blank credential fails before any provider is constructed.
pub async fn invoke(
    factory: &dyn ProviderFactory,
    spec: &PromptSpec,
    credential: Option<&str>,
) -> GenerationResult {
    let credential = require_credential(credential)?;

    let provider = factory.create_provider(credential).map_err(|e| {
        warn!("Failed to initialize the generation service: {e}");
        GenerationError::from(e)
    })?;

    info!("Calling model '{}'.", factory.model_name());
    debug!("System instruction:\n{}", spec.system_instruction);
    debug!("User query: {}", spec.user_query);

    match provider
        .generate(&spec.system_instruction, &spec.user_query)
        .await
    {
        Ok(text) => {
            info!("Generation succeeded ({} characters).", text.len());
            Ok(text)
        }
        Err(e) => {
            warn!("Generation call failed: {e}");
            Err(GenerationError::from(e))
        }
    }
}

/// Generates sections of one policy manual.
#[derive(Debug, Clone)]
pub struct PolicyGenerator {
    kind: PolicyKind,
    factory: Arc<dyn ProviderFactory>,
}

impl PolicyGenerator {
    pub fn new(kind: PolicyKind, factory: Arc<dyn ProviderFactory>) -> Self {
        Self { kind, factory }
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn factory(&self) -> &Arc<dyn ProviderFactory> {
        &self.factory
    }

    pub fn assemble(&self, request: &GenerationRequest) -> PromptSpec {
        assemble_prompt(self.kind, request)
    }

    /// Assembles and sends the request. Every call reaches the provider; nothing
    /// is cached.
    #[instrument(skip_all, fields(kind = %self.kind, section = %request.section))]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        credential: Option<&str>,
    ) -> GenerationResult {
        let spec = self.assemble(request);
        invoke(self.factory.as_ref(), &spec, credential).await
    }
}
