use crate::errors::GenerationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named free-text form fields, keyed by field name (e.g. `agency_name`).
pub type SectionInputs = BTreeMap<String, String>;

/// The outcome of a generation: the produced text, or the reason there is none.
pub type GenerationResult = Result<String, GenerationError>;

/// One user-triggered generation action.
///
/// A request is built fresh for every action. Fields the template needs but the
/// request lacks are rendered as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The section tag: a full section title or its short name.
    pub section: String,
    #[serde(default)]
    pub inputs: SectionInputs,
    /// Text extracted from reference documents. `None` or blank means no context.
    #[serde(default)]
    pub reference_text: Option<String>,
}

impl GenerationRequest {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    pub fn with_inputs(mut self, inputs: SectionInputs) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_reference_text(mut self, text: Option<String>) -> Self {
        self.reference_text = text;
        self
    }
}

/// The assembled request for the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSpec {
    pub system_instruction: String,
    pub user_query: String,
}
