//! AI backend configuration
//!
//! Resolution order, later layers win:
//! 1. Embedded defaults (`config/nexus.toml`, compiled into binary)
//! 2. Override file in data dir (~/.local/share/nexus/config/nexus.toml)
//! 3. Environment: `AI_BACKEND`, `OLLAMA_HOST`, `OLLAMA_MODEL`, `OLLAMA_TIMEOUT_SECS`
//!
//! CLI flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/nexus.toml");

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma:2b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which insight backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Ollama,
    /// Canned responses, for working without a model server
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown AI backend: {}", s)),
        }
    }
}

/// Connection settings for the insight backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightConfig {
    pub backend: BackendKind,
    pub host: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Ollama,
            host: DEFAULT_OLLAMA_HOST.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl InsightConfig {
    /// Load from the default override location and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load with an explicit override file (missing files fall back to defaults)
    pub fn load_from(override_path: Option<&Path>) -> Result<Self> {
        let mut config = parse_config(DEFAULT_CONFIG, Self::default())?;

        if let Some(path) = override_path.filter(|p| p.exists()) {
            debug!(path = %path.display(), "Loading config override");
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
            config = parse_config(&content, config)?;
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = lookup("AI_BACKEND") {
            self.backend = backend.parse().map_err(Error::Config)?;
        }
        if let Some(host) = lookup("OLLAMA_HOST") {
            self.host = host;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.model = model;
        }
        if let Some(secs) = lookup("OLLAMA_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("Invalid OLLAMA_TIMEOUT_SECS: {}", secs)))?;
            self.timeout = timeout_from_secs(secs, "OLLAMA_TIMEOUT_SECS")?;
        }
        Ok(())
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("nexus").join("config").join("nexus.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    ai: Option<RawAi>,
    ollama: Option<RawOllama>,
}

#[derive(Debug, Deserialize)]
struct RawAi {
    backend: Option<BackendKind>,
}

#[derive(Debug, Deserialize)]
struct RawOllama {
    host: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

/// Parse TOML content, keeping `base` values for anything not set
fn parse_config(content: &str, base: InsightConfig) -> Result<InsightConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = base;
    if let Some(backend) = raw.ai.and_then(|ai| ai.backend) {
        config.backend = backend;
    }
    if let Some(ollama) = raw.ollama {
        if let Some(host) = ollama.host {
            config.host = host;
        }
        if let Some(model) = ollama.model {
            config.model = model;
        }
        if let Some(secs) = ollama.timeout_secs {
            config.timeout = timeout_from_secs(secs, "ollama.timeout_secs")?;
        }
    }
    Ok(config)
}

/// A zero timeout would fail every request before it is sent
fn timeout_from_secs(secs: u64, source: &str) -> Result<Duration> {
    if secs == 0 {
        return Err(Error::Config(format!("{} must be at least 1 second", source)));
    }
    Ok(Duration::from_secs(secs))
}
