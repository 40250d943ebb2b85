//! Configuration loading for the biomechanics QA server.
//! Reads biomechqa.toml from the current directory or the path in the
//! BIOMECHQA_CONFIG env var, then applies environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use biomechqa_runner::RunnerConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub runner: ScriptConfig,
    #[serde(default)]
    pub public: PublicConfig,
    #[serde(default = "default_redirects")]
    pub redirects: Vec<RedirectRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_bind()       -> String  { "127.0.0.1:3000".to_string() }
fn default_static_dir() -> PathBuf { PathBuf::from("static") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    #[serde(default = "default_python")]
    pub python: PathBuf,
    #[serde(default = "default_script")]
    pub script: PathBuf,
    #[serde(default = "default_corpus_root")]
    pub corpus_root: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_python()       -> PathBuf { PathBuf::from("python") }
fn default_script()       -> PathBuf { PathBuf::from("scripts/paper_qa.py") }
fn default_corpus_root()  -> PathBuf { PathBuf::from(".") }
fn default_timeout_secs() -> u64     { 300 }

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            script: default_script(),
            corpus_root: default_corpus_root(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScriptConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::python(&self.python, &self.script, self.timeout())
    }
}

/// Values handed to the browser as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicConfig {
    /// Base URL the form posts to. Empty means same origin.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_image_domains")]
    pub image_domains: Vec<String>,
}

fn default_image_domains() -> Vec<String> { vec!["example.com".to_string()] }

impl Default for PublicConfig {
    fn default() -> Self {
        Self { api_url: None, image_domains: default_image_domains() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub source: String,
    pub destination: String,
    #[serde(default = "bool_true")]
    pub permanent: bool,
}

fn bool_true() -> bool { true }

fn default_redirects() -> Vec<RedirectRule> {
    vec![RedirectRule {
        source: "/old-page".to_string(),
        destination: "/new-page".to_string(),
        permanent: true,
    }]
}

/// Paths the router always owns; a redirect may not shadow them.
pub const RESERVED_PATHS: &[&str] = &["/", "/health", "/api/qa", "/api/topics", "/api/config"];

mod tests;

impl Config {
    /// Load configuration from biomechqa.toml.
    /// Checks BIOMECHQA_CONFIG env var first, then current directory.
    /// A missing file is not an error; every field has a default.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("BIOMECHQA_CONFIG")
            .unwrap_or_else(|_| "biomechqa.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else {
            tracing::info!("Config file {} not found, using defaults", path);
            Config::default_with_redirects()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `Default` leaves `redirects` empty; this matches an empty config file.
    pub fn default_with_redirects() -> Self {
        Self { redirects: default_redirects(), ..Self::default() }
    }

    /// Apply BIOMECHQA_* and NEXT_PUBLIC_API_URL overrides.
    pub fn apply_env<F>(&mut self, var: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = var("BIOMECHQA_BIND") {
            self.server.bind = bind;
        }
        if let Some(python) = var("BIOMECHQA_PYTHON") {
            self.runner.python = PathBuf::from(python);
        }
        if let Some(script) = var("BIOMECHQA_SCRIPT") {
            self.runner.script = PathBuf::from(script);
        }
        if let Some(root) = var("BIOMECHQA_CORPUS_ROOT") {
            self.runner.corpus_root = PathBuf::from(root);
        }
        if let Some(secs) = var("BIOMECHQA_TIMEOUT_SECS") {
            self.runner.timeout_secs = secs.trim().parse().map_err(|e| {
                anyhow::anyhow!("BIOMECHQA_TIMEOUT_SECS must be a whole number of seconds: {}", e)
            })?;
        }
        if let Some(url) = var("NEXT_PUBLIC_API_URL") {
            self.public.api_url = if url.trim().is_empty() { None } else { Some(url) };
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.runner.timeout_secs == 0 {
            anyhow::bail!("runner.timeout_secs must be greater than zero");
        }

        let mut seen = std::collections::HashSet::new();
        for rule in &self.redirects {
            if !rule.source.starts_with('/') {
                anyhow::bail!("redirect source must start with '/': {}", rule.source);
            }
            if rule.source.contains(['{', '}', '*', ':']) {
                anyhow::bail!("redirect source must be a literal path: {}", rule.source);
            }
            if RESERVED_PATHS.contains(&rule.source.as_str()) || rule.source == "/static" || rule.source.starts_with("/static/") {
                anyhow::bail!("redirect source shadows a built-in route: {}", rule.source);
            }
            if !seen.insert(rule.source.as_str()) {
                anyhow::bail!("duplicate redirect source: {}", rule.source);
            }
            if rule.destination.is_empty() {
                anyhow::bail!("redirect destination is empty for {}", rule.source);
            }
        }
        Ok(())
    }
}
