//! Pluggable local AI backend abstraction
//!
//! # Architecture
//!
//! - `InsightBackend` trait: the interface every backend implements
//! - `InsightClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OllamaBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = InsightConfig::load()?;
//! let client = InsightClient::from_config(&config)?;
//!
//! let outcome = client.generate_insight(&prompt).await;
//! println!("{}", outcome.display_text());
//! ```

mod mock;
mod ollama;
pub mod types;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use types::*;

use async_trait::async_trait;

use crate::config::{BackendKind, InsightConfig};
use crate::error::Result;

/// Trait defining the interface for all insight backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait InsightBackend: Send + Sync {
    /// Send one prompt and map whatever happens to an outcome
    async fn generate_insight(&self, prompt: &str) -> InsightOutcome;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete insight client enum
#[derive(Clone)]
pub enum InsightClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl InsightClient {
    pub fn from_config(config: &InsightConfig) -> Result<Self> {
        match config.backend {
            BackendKind::Ollama => Ok(Self::Ollama(OllamaBackend::from_config(config)?)),
            BackendKind::Mock => Ok(Self::Mock(MockBackend::new().with_model(&config.model))),
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        Self::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            Self::Ollama(b) => Self::Ollama(b.with_model(model)),
            Self::Mock(b) => Self::Mock(b.with_model(model)),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Ollama(_) => BackendKind::Ollama.as_str(),
            Self::Mock(_) => BackendKind::Mock.as_str(),
        }
    }
}

#[async_trait]
impl InsightBackend for InsightClient {
    async fn generate_insight(&self, prompt: &str) -> InsightOutcome {
        match self {
            Self::Ollama(b) => b.generate_insight(prompt).await,
            Self::Mock(b) => b.generate_insight(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            Self::Ollama(b) => b.health_check().await,
            Self::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::Ollama(b) => b.model(),
            Self::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            Self::Ollama(b) => b.host(),
            Self::Mock(b) => b.host(),
        }
    }
}
