//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Insight requests against the configured model
//! - `data` - Sample generation and dataset description
//! - `ollama` - Ollama connection status
//! - `prompts` - Prompt library management commands
//! - `serve` - Web server command

pub mod analyze;
pub mod data;
pub mod ollama;
pub mod prompts;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use data::*;
pub use ollama::*;
pub use prompts::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};
use nexus_core::{generator::generate_now, import::load_csv, DataTable, InsightConfig};

use crate::cli::DataSource;

/// Resolve the insight config: file, then environment, then CLI flags
pub fn load_config(
    path: Option<&Path>,
    host: Option<&str>,
    model: Option<&str>,
) -> Result<InsightConfig> {
    let mut config = match path {
        Some(path) => InsightConfig::load_from(Some(path)),
        None => InsightConfig::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(model) = model {
        config = config.with_model(model);
    }

    Ok(config)
}

/// Load the table a command works on
pub fn load_table(source: &DataSource) -> Result<DataTable> {
    match (&source.file, source.domain) {
        (Some(path), _) => load_csv(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display())),
        (None, Some(domain)) => Ok(generate_now(domain).into_table()),
        (None, None) => anyhow::bail!("Provide --file <csv> or --domain <domain>"),
    }
}
