//! Shared test doubles for the comms911 crates: scripted generation and
//! embedding services, a factory handing them out, and PDF fixtures.

use async_trait::async_trait;
use comms911::providers::ai::{AiProvider, Embedder};
use comms911::providers::factory::ProviderFactory;
use comms911::PromptError;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

#[derive(Debug, Default)]
struct Script {
    /// `(system prompt fragment, reply)`, checked in insertion order.
    rules: Vec<(String, String)>,
    /// Every `(system, user)` prompt pair received.
    calls: Vec<(String, String)>,
}

/// A generation service that answers from a script.
///
/// A call is answered by the first rule whose fragment appears in the
/// system prompt; a call matching no rule fails with `AiApi`.
#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    script: Arc<Mutex<Script>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, fragment: &str, response: &str) {
        self.script
            .lock()
            .unwrap()
            .rules
            .push((fragment.to_string(), response.to_string()));
    }

    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let mut script = self.script.lock().unwrap();
        script
            .calls
            .push((system_prompt.to_string(), user_prompt.to_string()));
        script
            .rules
            .iter()
            .find(|(fragment, _)| system_prompt.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .ok_or_else(|| {
                PromptError::AiApi(format!(
                    "no scripted reply for system prompt '{system_prompt}'"
                ))
            })
    }
}

// --- Mock Embedder ---

/// Embeds text as the number of times each vocabulary word occurs in it.
#[derive(Clone, Debug)]
pub struct MockEmbedder {
    vocabulary: Vec<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockEmbedder {
    pub fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.to_lowercase()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PromptError> {
        self.calls.lock().unwrap().push(text.to_string());
        let lowered = text.to_lowercase();
        Ok(self
            .vocabulary
            .iter()
            .map(|word| lowered.matches(word.as_str()).count() as f32)
            .collect())
    }
}

// --- Mock Provider Factory ---

/// A [`ProviderFactory`] handing out clones of one mock provider and embedder.
///
/// The credential is only checked for presence, so any non-blank key works.
#[derive(Clone, Debug)]
pub struct MockProviderFactory {
    pub provider: MockAiProvider,
    pub embedder: MockEmbedder,
}

impl MockProviderFactory {
    pub fn new(provider: MockAiProvider, embedder: MockEmbedder) -> Self {
        Self { provider, embedder }
    }
}

impl ProviderFactory for MockProviderFactory {
    fn create_provider(&self, api_key: &str) -> Result<Box<dyn AiProvider>, PromptError> {
        if api_key.trim().is_empty() {
            return Err(PromptError::MissingApiKey);
        }
        Ok(Box::new(self.provider.clone()))
    }

    fn create_embedder(&self, api_key: &str) -> Result<Box<dyn Embedder>, PromptError> {
        if api_key.trim().is_empty() {
            return Err(PromptError::MissingApiKey);
        }
        Ok(Box::new(self.embedder.clone()))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

// --- PDF fixtures ---
#[cfg(feature = "pdf")]
pub mod helpers {
    use anyhow::{anyhow, Result};
    use printpdf::{
        BuiltinFont, FontId, Layer, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, Pt,
        TextItem, TextMatrix, TextRenderingMode,
    };

    const TOP_MM: f32 = 280.0;
    const LINE_HEIGHT_MM: f32 = 8.0;

    /// The operations drawing `text` with its baseline at `y` millimetres.
    fn line_ops(font: &FontId, text: &str, y: f32) -> [Op; 5] {
        [
            Op::StartTextSection,
            Op::SetTextMatrix {
                matrix: TextMatrix::Translate(Mm(10.0).into(), Mm(y).into()),
            },
            Op::SetTextRenderingMode {
                mode: TextRenderingMode::Fill,
            },
            Op::WriteText {
                items: vec![TextItem::Text(text.to_string())],
                font: font.clone(),
            },
            Op::EndTextSection,
        ]
    }

    /// An A4 page of Helvetica text, one entry of `lines` per line.
    pub fn generate_test_pdf_lines(lines: &[&str]) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new("Reference Document");
        let layer_id = doc.add_layer(&Layer::new("Text"));

        let helvetica = BuiltinFont::Helvetica.get_subset_font().bytes;
        let parsed = ParsedFont::from_bytes(&helvetica, 0, &mut Vec::new())
            .ok_or_else(|| anyhow!("Helvetica could not be parsed"))?;
        let font = doc.add_font(&parsed);

        let mut ops = vec![
            Op::BeginLayer {
                layer_id: layer_id.clone(),
            },
            Op::SetFontSize {
                size: Pt(12.0),
                font: font.clone(),
            },
        ];
        let mut y = TOP_MM;
        for line in lines {
            ops.extend(line_ops(&font, line, y));
            y -= LINE_HEIGHT_MM;
        }
        ops.push(Op::EndLayer { layer_id });

        doc.pages.push(PdfPage::new(Mm(210.0), Mm(297.0), ops));

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            eprintln!("printpdf reported: {warnings:?}");
        }
        Ok(bytes)
    }

    /// A one-line PDF.
    pub fn generate_test_pdf(text: &str) -> Result<Vec<u8>> {
        generate_test_pdf_lines(&[text])
    }
}
