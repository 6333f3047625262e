//! Insight outcome types
//!
//! These types are backend-agnostic. Every insight request ends in an
//! `InsightOutcome`; failures are values, tagged by kind, so callers can tell a
//! dead server from a bad reply without matching on strings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shown when the model answered but produced no text
pub const NO_SUMMARY_MESSAGE: &str = "⚠️ No summary generated.";

/// Shown when the model server answered with a non-success status
pub const INVALID_RESPONSE_MESSAGE: &str = "❌ Error: Invalid response from Ollama.";

/// Why an insight request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightErrorKind {
    /// The model server could not be reached
    Unreachable,
    /// The server answered with a non-success HTTP status
    InvalidResponse,
    /// No complete answer within the configured timeout
    Timeout,
    /// Anything else (malformed body, request build errors, ...)
    Other,
}

/// A failed insight request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightFailure {
    pub kind: InsightErrorKind,
    /// User-facing message
    pub message: String,
    /// Underlying error text, for logs
    pub detail: Option<String>,
}

impl InsightFailure {
    pub fn unreachable(model: &str, detail: impl Into<String>) -> Self {
        Self {
            kind: InsightErrorKind::Unreachable,
            message: format!(
                "❌ Error: Cannot connect to Ollama. Please ensure it's running with: ollama run {}",
                model
            ),
            detail: Some(detail.into()),
        }
    }

    pub fn invalid_response(status: u16) -> Self {
        Self {
            kind: InsightErrorKind::InvalidResponse,
            message: INVALID_RESPONSE_MESSAGE.to_string(),
            detail: Some(format!("HTTP status {}", status)),
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self {
            kind: InsightErrorKind::Timeout,
            message: format!(
                "❌ Error: Ollama did not respond within {} seconds.",
                after.as_secs()
            ),
            detail: None,
        }
    }

    pub fn other(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            kind: InsightErrorKind::Other,
            message: format!("❌ Error: {}", error),
            detail: Some(error),
        }
    }
}

/// Result of one insight request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InsightOutcome {
    /// The model's analysis text
    Summary { text: String },
    /// The model answered without any text
    Empty,
    Failed(InsightFailure),
}

impl InsightOutcome {
    pub fn summary(text: impl Into<String>) -> Self {
        Self::Summary { text: text.into() }
    }

    /// Text to show the user, for success and failure alike
    pub fn display_text(&self) -> &str {
        match self {
            Self::Summary { text } => text,
            Self::Empty => NO_SUMMARY_MESSAGE,
            Self::Failed(failure) => &failure.message,
        }
    }

    pub fn status(&self) -> InsightStatus {
        match self {
            Self::Summary { .. } => InsightStatus::Success,
            Self::Empty => InsightStatus::Empty,
            Self::Failed(failure) => match failure.kind {
                InsightErrorKind::Unreachable => InsightStatus::Unreachable,
                InsightErrorKind::InvalidResponse => InsightStatus::InvalidResponse,
                InsightErrorKind::Timeout => InsightStatus::Timeout,
                InsightErrorKind::Other => InsightStatus::Error,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Summary { .. })
    }

    pub fn failure(&self) -> Option<&InsightFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Flat outcome tag stored with each analysis record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightStatus {
    Success,
    Empty,
    Unreachable,
    InvalidResponse,
    Timeout,
    Error,
}

impl InsightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Empty => "empty",
            Self::Unreachable => "unreachable",
            Self::InvalidResponse => "invalid_response",
            Self::Timeout => "timeout",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for InsightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
