//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Besides the configuration and the provider
//! factory, the state owns every live session. Each session sits behind its own
//! mutex, so requests on one session run one at a time while different sessions
//! never wait on each other.

use crate::{
    config::AppConfig,
    errors::AppError,
    types::{SessionInfo, SessionKind},
};
use comms911::{
    ingest::TextExtractor,
    providers::factory::{ConfiguredProviderFactory, ProviderFactory},
    qa::{DocumentQa, QaMode, QaSession},
    retrieval::TursoVectorStore,
    PolicyKind, SessionContext,
};
use comms911_pdf::PdfTextExtractor;
use std::{collections::HashMap, io::ErrorKind, path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

/// The per-user state behind one session id.
#[derive(Debug)]
pub enum Session {
    Policy(SessionContext),
    Qa(QaSession),
}

impl Session {
    pub fn kind(&self) -> SessionKind {
        match self {
            Session::Policy(ctx) => match ctx.kind() {
                PolicyKind::Tert => SessionKind::Tert,
                PolicyKind::Ng911 => SessionKind::Ng911,
            },
            Session::Qa(_) => SessionKind::Qa,
        }
    }

    pub fn policy_mut(&mut self) -> Result<&mut SessionContext, AppError> {
        match self {
            Session::Policy(ctx) => Ok(ctx),
            Session::Qa(_) => Err(AppError::WrongSessionKind { expected: "policy" }),
        }
    }

    pub fn qa_mut(&mut self) -> Result<&mut QaSession, AppError> {
        match self {
            Session::Qa(qa) => Ok(qa),
            Session::Policy(_) => Err(AppError::WrongSessionKind { expected: "Q&A" }),
        }
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// Builds generation and embedding clients from the caller's credential.
    pub factory: Arc<dyn ProviderFactory>,
    /// Reads the text layer of uploaded documents.
    pub extractor: Arc<dyn TextExtractor>,
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl AppState {
    pub fn new(config: AppConfig, factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            config: Arc::new(config),
            factory,
            extractor: Arc::new(PdfTextExtractor),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A question answerer using the configured retrieval settings.
    pub fn document_qa(&self) -> DocumentQa {
        DocumentQa::new(Arc::clone(&self.factory), self.config.retrieval.settings())
    }

    /// The index database of a retrieval session.
    pub fn index_path(&self, id: Uuid) -> PathBuf {
        PathBuf::from(&self.config.retrieval.index_dir).join(format!("{id}.db"))
    }

    /// Creates and registers a new session.
    ///
    /// Q&A sessions without an explicit mode use the configured default.
    pub async fn create_session(
        &self,
        kind: SessionKind,
        qa_mode: Option<QaMode>,
    ) -> Result<SessionInfo, AppError> {
        let id = Uuid::new_v4();
        let (session, qa_mode) = match kind.policy_kind() {
            Some(policy_kind) => (Session::Policy(SessionContext::new(policy_kind)), None),
            None => {
                let mode = qa_mode.unwrap_or(self.config.qa_mode);
                let qa = match mode {
                    QaMode::SingleShot => QaSession::single_shot(),
                    QaMode::Retrieval => {
                        let path = self.index_path(id);
                        if let Some(dir) = path.parent() {
                            tokio::fs::create_dir_all(dir)
                                .await
                                .map_err(anyhow::Error::from)?;
                        }
                        let store = TursoVectorStore::new(&path.to_string_lossy())
                            .await
                            .map_err(anyhow::Error::from)?;
                        QaSession::retrieval(Arc::new(store))
                    }
                };
                (Session::Qa(qa), Some(mode))
            }
        };

        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        info!(session_id = %id, ?kind, "Created session.");
        Ok(SessionInfo {
            session_id: id.to_string(),
            kind,
            qa_mode,
        })
    }

    pub async fn session(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::SessionNotFound(id))
    }

    /// Forgets a session and deletes its on-disk index and write-ahead log, if
    /// it has them.
    pub async fn remove_session(&self, id: Uuid) -> Result<(), AppError> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or(AppError::SessionNotFound(id))?;

        let is_retrieval = matches!(
            &*handle.lock().await,
            Session::Qa(qa) if qa.mode() == QaMode::Retrieval
        );
        drop(handle);
        if is_retrieval {
            let path = self.index_path(id);
            let wal = PathBuf::from(format!("{}-wal", path.display()));
            for file in [path, wal] {
                match tokio::fs::remove_file(&file).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => {
                        warn!(index = %file.display(), "Failed to delete similarity index: {}", e)
                    }
                }
            }
        }
        Ok(())
    }

    /// Removes every session, deleting retrieval indexes. Returns how many
    /// sessions there were.
    pub async fn clear_sessions(&self) -> usize {
        let ids: Vec<Uuid> = self.sessions.read().await.keys().copied().collect();
        for id in &ids {
            // Sessions deleted concurrently are already gone.
            let _ = self.remove_session(*id).await;
        }
        ids.len()
    }
}

/// Builds the shared application state from the configuration.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let factory =
        ConfiguredProviderFactory::new(config.generation.clone(), config.embedding.clone());
    info!(
        provider = ?config.generation.provider,
        model = %config.generation.model_name,
        "Configured generation service."
    );
    Ok(AppState::new(config, Arc::new(factory)))
}
