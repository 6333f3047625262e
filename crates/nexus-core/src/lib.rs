//! Nexus Core Library
//!
//! Shared functionality for the Nexus digital twin sensor dashboard:
//! - Synthetic sensor data for the temperature, CO₂ and radiation domains
//! - CSV loading into a validated table
//! - Descriptive statistics and the text digest sent to the model
//! - Pluggable local AI backends (Ollama, mock)
//! - Prompt library for customizable AI prompts
//! - Per-session analysis history
//! - Chart payloads for the dashboard

pub mod ai;
pub mod analysis;
pub mod charts;
pub mod config;
pub mod digest;
pub mod error;
pub mod generator;
pub mod import;
pub mod models;
pub mod prompts;
pub mod session;
pub mod stats;

/// Test utilities including mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{
    InsightBackend, InsightClient, InsightErrorKind, InsightFailure, InsightOutcome,
    InsightStatus, MockBackend, OllamaBackend,
};
pub use analysis::Analyst;
pub use charts::{ChartSeries, CorrelationMatrix, DatasetView};
pub use config::{BackendKind, InsightConfig};
pub use digest::DataDigest;
pub use error::{Error, Result};
pub use models::{DataTable, NumericColumn, SensorDomain, SensorReading, SensorSeries};
pub use prompts::{Prompt, PromptId, PromptInfo, PromptLibrary, PromptSource};
pub use session::{AnalysisRecord, SessionHistory};
pub use stats::ColumnSummary;
