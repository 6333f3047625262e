//! Ollama backend implementation
//!
//! HTTP client for the Ollama `/api/generate` endpoint. One non-streaming
//! request per insight; every failure is mapped to an `InsightOutcome`
//! instead of being returned as an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::InsightConfig;
use crate::error::Result;

use super::types::{InsightFailure, InsightOutcome};
use super::InsightBackend;

/// Timeout for the lightweight `/api/tags` probe
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama backend
///
/// # Configuration
///
/// Built from `InsightConfig` (see `config` module):
///
/// ```toml
/// [ollama]
/// host = "http://localhost:11434"
/// model = "gemma:2b"
/// timeout_secs = 30
/// ```
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &InsightConfig) -> Result<Self> {
        Self::new(&config.host, &config.model, config.timeout)
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
            timeout: self.timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Names of the models installed on the server
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Map a transport-level error onto the failure taxonomy
    fn transport_failure(&self, error: reqwest::Error) -> InsightOutcome {
        let failure = if error.is_timeout() {
            warn!(host = %self.base_url, timeout_secs = self.timeout.as_secs(), "Ollama request timed out");
            InsightFailure::timeout(self.timeout)
        } else if error.is_connect() {
            warn!(host = %self.base_url, error = %error, "Cannot connect to Ollama");
            InsightFailure::unreachable(&self.model, error.to_string())
        } else {
            warn!(host = %self.base_url, error = %error, "Ollama request failed");
            InsightFailure::other(error.to_string())
        };
        InsightOutcome::Failed(failure)
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: Option<String>,
}

/// Response from the tags endpoint
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

#[async_trait]
impl InsightBackend for OllamaBackend {
    async fn generate_insight(&self, prompt: &str) -> InsightOutcome {
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        info!(model = %self.model, prompt_chars = prompt.len(), "Requesting insight from Ollama");

        let response = match self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return self.transport_failure(e),
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Ollama returned non-success status");
            return InsightOutcome::Failed(InsightFailure::invalid_response(status.as_u16()));
        }

        let ollama_response: OllamaResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => return self.transport_failure(e),
        };

        match ollama_response.response {
            Some(text) if !text.trim().is_empty() => {
                debug!("Ollama insight response: {}", text);
                InsightOutcome::summary(text)
            }
            _ => {
                warn!("Ollama response had no text");
                InsightOutcome::Empty
            }
        }
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::{InsightErrorKind, NO_SUMMARY_MESSAGE};
    use crate::test_utils::{MockBehavior, MockOllamaServer};

    fn backend_for(server: &MockOllamaServer) -> OllamaBackend {
        OllamaBackend::new(&server.url(), "gemma:2b", Duration::from_secs(30)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_response_returned_verbatim() {
        let mut server = MockOllamaServer::start(MockBehavior::Reply("X".into())).await;
        let backend = backend_for(&server);

        let outcome = backend.generate_insight("analyze this").await;
        assert_eq!(outcome, InsightOutcome::summary("X"));
        assert_eq!(outcome.display_text(), "X");

        server.stop();
    }

    #[tokio::test]
    async fn test_request_body_shape() {
        let mut server = MockOllamaServer::start(MockBehavior::Reply("ok".into())).await;
        let backend = backend_for(&server);

        backend.generate_insight("digest goes here").await;

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gemma:2b");
        assert_eq!(requests[0].prompt, "digest goes here");
        assert!(!requests[0].stream);

        server.stop();
    }

    #[tokio::test]
    async fn test_empty_response_field() {
        let mut server = MockOllamaServer::start(MockBehavior::Reply(String::new())).await;
        let outcome = backend_for(&server).generate_insight("p").await;
        assert_eq!(outcome, InsightOutcome::Empty);
        assert_eq!(outcome.display_text(), NO_SUMMARY_MESSAGE);
        server.stop();
    }

    #[tokio::test]
    async fn test_missing_response_field() {
        let mut server = MockOllamaServer::start(MockBehavior::MissingField).await;
        let outcome = backend_for(&server).generate_insight("p").await;
        assert_eq!(outcome.display_text(), "⚠️ No summary generated.");
        server.stop();
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mut server = MockOllamaServer::start(MockBehavior::Status(500)).await;
        let outcome = backend_for(&server).generate_insight("p").await;
        assert_eq!(
            outcome.display_text(),
            "❌ Error: Invalid response from Ollama."
        );
        assert_eq!(
            outcome.failure().map(|f| f.kind),
            Some(InsightErrorKind::InvalidResponse)
        );
        server.stop();
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let mut server = MockOllamaServer::start(MockBehavior::Status(404)).await;
        let outcome = backend_for(&server).generate_insight("p").await;
        assert_eq!(
            outcome.failure().map(|f| f.kind),
            Some(InsightErrorKind::InvalidResponse)
        );
        server.stop();
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = MockOllamaServer::start(MockBehavior::Malformed).await;
        let outcome = backend_for(&server).generate_insight("p").await;
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, InsightErrorKind::Other);
        assert!(failure.message.starts_with("❌ Error: "));
        server.stop();
    }

    #[tokio::test]
    async fn test_connection_failure() {
        // Bind then drop a listener so the port is known to be closed
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend =
            OllamaBackend::new(&format!("http://{}", addr), "gemma:2b", Duration::from_secs(5))
                .unwrap();
        let outcome = backend.generate_insight("p").await;

        assert_eq!(
            outcome.failure().map(|f| f.kind),
            Some(InsightErrorKind::Unreachable)
        );
        assert!(outcome.display_text().contains("ollama run gemma:2b"));
    }

    #[tokio::test]
    async fn test_timeout_is_its_own_category() {
        let mut server = MockOllamaServer::start(MockBehavior::Delay(
            Duration::from_secs(3),
            "too late".into(),
        ))
        .await;
        let backend =
            OllamaBackend::new(&server.url(), "gemma:2b", Duration::from_millis(300)).unwrap();

        let outcome = backend.generate_insight("p").await;
        assert_eq!(
            outcome.failure().map(|f| f.kind),
            Some(InsightErrorKind::Timeout)
        );
        server.stop();
    }

    #[tokio::test]
    async fn test_health_check_and_models() {
        let mut server = MockOllamaServer::start(MockBehavior::Reply("ok".into())).await;
        let backend = backend_for(&server);

        assert!(backend.health_check().await);
        let models = backend.list_models().await.unwrap();
        assert!(models.contains(&"gemma:2b".to_string()));

        server.stop();
    }

    #[tokio::test]
    async fn test_with_model_changes_request_and_message() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend =
            OllamaBackend::new(&format!("http://{}/", addr), "gemma:2b", Duration::from_secs(5))
                .unwrap()
                .with_model("llama3.2");
        assert_eq!(backend.model(), "llama3.2");
        assert_eq!(backend.host(), format!("http://{}", addr));

        let outcome = backend.generate_insight("p").await;
        assert!(outcome.display_text().contains("ollama run llama3.2"));
    }
}
