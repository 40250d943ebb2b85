//! Shared application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use biomechqa_common::Topic;
use biomechqa_runner::{QaBackend, ScriptRunner};

use crate::config::{Config, PublicConfig};

/// Shared state injected into every Axum handler. Holds no per-request data;
/// each question gets its own process and its own output buffer.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn QaBackend>,
    pub corpus_root: PathBuf,
    pub public: PublicConfig,
}

impl AppState {
    pub fn new(backend: Arc<dyn QaBackend>, corpus_root: PathBuf, public: PublicConfig) -> Self {
        Self { backend, corpus_root, public }
    }

    /// State backed by the real QA script.
    pub fn from_config(config: &Config) -> Self {
        let runner = ScriptRunner::new(config.runner.runner_config());
        Self::new(Arc::new(runner), config.runner.corpus_root.clone(), config.public.clone())
    }

    pub fn corpus_dir(&self, topic: Topic) -> PathBuf {
        self.corpus_root.join(topic.corpus_dir_name())
    }
}

pub type SharedState = Arc<AppState>;
