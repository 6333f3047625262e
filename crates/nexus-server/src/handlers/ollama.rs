//! Health and model connection handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use nexus_core::{InsightBackend, InsightClient};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Model connection status
#[derive(Debug, Serialize)]
pub struct OllamaStatus {
    pub backend: &'static str,
    pub host: String,
    pub model: String,
    pub timeout_secs: u64,
    pub available: bool,
    /// Models installed on the host (empty when unreachable)
    pub models: Vec<String>,
    /// Whether the configured model is among them
    pub model_installed: bool,
}

/// GET /api/ollama/status - Check whether the model server answers
pub async fn ollama_status(State(state): State<Arc<AppState>>) -> Json<OllamaStatus> {
    let client = state.analyst.client();
    let available = client.health_check().await;

    let models = match client {
        InsightClient::Ollama(backend) if available => {
            backend.list_models().await.unwrap_or_default()
        }
        InsightClient::Mock(_) => vec![client.model().to_string()],
        _ => Vec::new(),
    };
    let model_installed = models.iter().any(|m| m == client.model());

    Json(OllamaStatus {
        backend: client.backend_name(),
        host: client.host().to_string(),
        model: client.model().to_string(),
        timeout_secs: state.config.insight.timeout.as_secs(),
        available,
        models,
        model_installed,
    })
}
