//! Ollama-related command implementations

use anyhow::{Context, Result};
use nexus_core::{InsightBackend, InsightClient, InsightConfig};

/// Check Ollama connection and model availability
pub async fn cmd_ollama_status(config: &InsightConfig) -> Result<()> {
    println!("🔍 Checking Ollama connection...\n");

    println!("  Backend: {}", config.backend.as_str());
    println!("  Host:    {}", config.host);
    println!("  Model:   {}", config.model);
    println!("  Timeout: {}s\n", config.timeout.as_secs());

    let client = InsightClient::from_config(config).context("Failed to create AI client")?;

    print!("Checking availability... ");
    if !client.health_check().await {
        println!("❌ Failed");
        println!("\n⚠️  Could not connect to Ollama at {}", client.host());
        println!("\nTo set up Ollama:");
        println!("  1. Install Ollama: https://ollama.ai/download");
        println!("  2. Start the model: ollama run {}", client.model());
        println!("  3. Or point to another host: export OLLAMA_HOST=<url>");
        return Ok(());
    }
    println!("✅ Connected");

    let InsightClient::Ollama(backend) = &client else {
        return Ok(());
    };

    let models = backend
        .list_models()
        .await
        .context("Failed to list installed models")?;

    println!("\n📦 Installed models:");
    for name in &models {
        let marker = if name == client.model() { "→" } else { " " };
        println!("  {} {}", marker, name);
    }

    if !models.iter().any(|m| m == client.model()) {
        println!(
            "\n⚠️  Model {} is not installed. Pull it with: ollama pull {}",
            client.model(),
            client.model()
        );
    }

    Ok(())
}
