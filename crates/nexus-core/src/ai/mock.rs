//! Mock backend for testing
//!
//! Useful for unit tests and for exercising the dashboard without a running
//! model server (`AI_BACKEND=mock`).

use async_trait::async_trait;

use super::types::InsightOutcome;
use super::InsightBackend;

/// Mock insight backend
///
/// Returns a canned analysis by default, or a fixed outcome when one is set.
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    outcome: Option<InsightOutcome>,
    model: String,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            outcome: None,
            model: "mock".to_string(),
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// Always answer with `outcome`
    pub fn with_outcome(outcome: InsightOutcome) -> Self {
        Self {
            outcome: Some(outcome),
            ..Self::new()
        }
    }

    pub fn with_model(&self, model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..self.clone()
        }
    }
}

#[async_trait]
impl InsightBackend for MockBackend {
    async fn generate_insight(&self, prompt: &str) -> InsightOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let parameters = prompt
            .lines()
            .find_map(|line| line.trim().strip_prefix("- Parameters: "))
            .unwrap_or("unknown");

        InsightOutcome::summary(format!(
            "## Key Patterns and Trends\n\
             - Parameters reviewed: {}\n\n\
             ## Potential Anomalies\n\
             - None detected by the mock backend\n\n\
             ## Recommendations\n\
             - Connect a real model server for a full analysis\n\n\
             ## Ecosystem Health\n\
             - Not assessed",
            parameters
        ))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        "mock://"
    }
}
