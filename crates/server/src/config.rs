//! # Application Configuration
//!
//! This module defines the configuration structure for the `comms911-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables.

use comms911::{
    constants::{
        DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_EMBEDDING_MODEL,
        DEFAULT_GENERATION_MODEL, DEFAULT_INDEX_DIR, DEFAULT_TOP_K,
    },
    providers::factory::{EmbeddingSettings, ProviderSettings},
    qa::{QaMode, RetrievalSettings},
};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The text-generation service used for policy sections and answers.
    #[serde(default)]
    pub generation: ProviderSettings,
    /// The embedding service used by retrieval Q&A sessions.
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// The Q&A mode for sessions that do not ask for one.
    #[serde(default)]
    pub qa_mode: QaMode,
}

fn default_port() -> u16 {
    9090
}

/// Chunking, ranking and on-disk location of the Q&A similarity index.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RetrievalConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Directory holding one index database per retrieval session.
    #[serde(default = "default_index_dir")]
    pub index_dir: String,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_index_dir() -> String {
    DEFAULT_INDEX_DIR.to_string()
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            index_dir: default_index_dir(),
        }
    }
}

impl RetrievalConfig {
    pub fn settings(&self) -> RetrievalSettings {
        RetrievalSettings {
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            top_k: self.top_k,
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - Layer 1: programmatic defaults (Gemini, `gemini-2.5-flash`, single-shot Q&A).
/// - Layer 2: `config.yml` next to the crate, or `config_path_override`. The
///   default file is optional; an explicit override must exist.
/// - Layer 3: top-level keys like `port` from unprefixed variables (`PORT`).
/// - Layer 4: nested keys from `COMMS911_...` variables, e.g.
///   `COMMS911_GENERATION__PROVIDER=local`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        .set_default("generation.provider", "gemini")?
        .set_default("generation.model_name", DEFAULT_GENERATION_MODEL)?
        .set_default("embedding.model_name", DEFAULT_EMBEDDING_MODEL)?
        .set_default("qa_mode", "single_shot")?;

    let main_content = match config_path_override {
        Some(override_path) => Some(read_and_substitute(override_path)?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{override_path}'."))
        })?),
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            let content = read_and_substitute(&user_config_path)?;
            if content.is_some() {
                info!("Loading user-defined configuration from '{user_config_path}'.");
            } else {
                info!("'{user_config_path}' not found. Using defaults and environment.");
            }
            content
        }
    };
    if let Some(content) = main_content {
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("COMMS911")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
