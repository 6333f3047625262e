//! Insight request command

use anyhow::{Context, Result};
use nexus_core::{
    Analyst, InsightBackend, InsightClient, InsightConfig, PromptLibrary, SessionHistory,
};

use super::load_table;
use crate::cli::DataSource;

/// Send the dataset digest to the model and print its analysis
pub async fn cmd_analyze(source: &DataSource, config: &InsightConfig) -> Result<()> {
    let table = load_table(source)?;
    let client = InsightClient::from_config(config).context("Failed to create AI client")?;

    println!(
        "🤖 Generating insights with {} at {}...\n",
        client.model(),
        client.host()
    );

    let analyst = Analyst::new(client, PromptLibrary::new());
    let mut history = SessionHistory::new();
    let record = analyst.analyze(&table, &mut history).await?;

    println!("📝 {}\n", record.title());
    println!("{}", record.content);

    Ok(())
}
