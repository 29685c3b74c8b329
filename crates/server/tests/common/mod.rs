//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `comms911-server`
//! integration tests.
//!
//! - `TestApp`: spawns a real server on a random port. Generation and embedding
//!   calls go to an `httpmock::MockServer` speaking the OpenAI-compatible API,
//!   and retrieval indexes are written to a temporary directory.
//! - Helpers for the mock responses and the common API calls.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use comms911::providers::factory::ProviderFactory;
use comms911_server::{
    config::{self, AppConfig},
    router,
    state::{build_app_state, AppState},
    types::{ApiResponse, SessionInfo},
};
use httpmock::MockServer;
use reqwest::{multipart, Client, Response};
use serde_json::{json, Value};
use std::{fs::File, io::Write, net::SocketAddr, sync::Arc};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const TEST_API_KEY: &str = "test-api-key";

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    /// Holds `config.yml` and the `qa_index` directory.
    pub data_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server with the OpenAI-compatible provider
    /// pointed at the mock server.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_qa_mode("single_shot").await
    }

    /// Like [`TestApp::spawn`], with `qa_mode` as the default for Q&A sessions.
    pub async fn spawn_with_qa_mode(qa_mode: &str) -> Result<Self> {
        let mock_server = MockServer::start();
        let data_dir = tempdir()?;
        let config = write_test_config(&mock_server, &data_dir, qa_mode)?;
        let app_state = build_app_state(config).await?;
        Self::spawn_with_state(app_state, mock_server, data_dir).await
    }

    /// Spawns the server with a caller-supplied provider factory.
    pub async fn spawn_with_factory(factory: Arc<dyn ProviderFactory>) -> Result<Self> {
        let mock_server = MockServer::start();
        let data_dir = tempdir()?;
        let config = write_test_config(&mock_server, &data_dir, "single_shot")?;
        let app_state = AppState::new(config, factory);
        Self::spawn_with_state(app_state, mock_server, data_dir).await
    }

    pub async fn spawn_with_state(
        app_state: AppState,
        mock_server: MockServer,
        data_dir: TempDir,
    ) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state_for_harness = app_state.clone();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            data_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Creates a session and returns its id.
    pub async fn create_session(&self, body: Value) -> Result<String> {
        let response = self
            .client
            .post(self.url("/sessions"))
            .json(&body)
            .send()
            .await?;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: ApiResponse<SessionInfo> = response.json().await?;
        Ok(body.result.session_id)
    }

    pub async fn generate(&self, session_id: &str, section: &str, inputs: Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(&format!("/sessions/{session_id}/generate")))
            .header("x-api-key", TEST_API_KEY)
            .json(&json!({ "section": section, "inputs": inputs }))
            .send()
            .await?)
    }

    /// Uploads `(file name, bytes)` pairs as one multipart request.
    pub async fn upload(&self, session_id: &str, files: Vec<(&str, Vec<u8>)>) -> Result<Response> {
        let mut form = multipart::Form::new().text("comment", "reference documents");
        for (name, bytes) in files {
            let part = multipart::Part::bytes(bytes)
                .file_name(name.to_string())
                .mime_str("application/pdf")?;
            form = form.part("files", part);
        }
        Ok(self
            .client
            .post(self.url(&format!("/sessions/{session_id}/documents")))
            .header("x-api-key", TEST_API_KEY)
            .multipart(form)
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// --- Mock Responses ---

/// An OpenAI-compatible chat completion carrying `content`.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "choices": [{
            "message": { "role": "assistant", "content": content }
        }]
    })
}

/// An OpenAI-compatible embeddings response carrying `vector`.
pub fn embedding_response(vector: &[f32]) -> Value {
    json!({ "data": [{ "embedding": vector }] })
}

/// Percent-encodes a section tag for use as a path segment.
pub fn encode_tag(tag: &str) -> String {
    tag.replace('%', "%25")
        .replace(' ', "%20")
        .replace(',', "%2C")
        .replace(':', "%3A")
}

/// Writes a `config.yml` pointing every external service at `mock_server`
/// and loads it through the normal configuration path.
fn write_test_config(mock_server: &MockServer, data_dir: &TempDir, qa_mode: &str) -> Result<AppConfig> {
    let config_path = data_dir.path().join("config.yml");
    let config_content = format!(
        r#"
port: 0
qa_mode: "{}"
generation:
  provider: "local"
  api_url: "{}"
  model_name: "mock-chat-model"
embedding:
  api_url: "{}"
  model_name: "mock-embedding-model"
retrieval:
  chunk_size: 200
  chunk_overlap: 20
  top_k: 2
  index_dir: "{}"
"#,
        qa_mode,
        mock_server.url("/v1/chat/completions"),
        mock_server.url("/v1/embeddings"),
        data_dir.path().join("qa_index").display()
    );
    let mut file = File::create(&config_path)?;
    file.write_all(config_content.as_bytes())?;

    Ok(config::get_config(Some(config_path.to_str().unwrap()))?)
}
