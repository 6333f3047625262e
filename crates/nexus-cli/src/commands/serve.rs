//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use nexus_core::InsightConfig;

pub async fn cmd_serve(
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    insight: InsightConfig,
) -> Result<()> {
    println!("🚀 Starting Nexus web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!(
        "   AI backend: {} at {} (model: {}, timeout: {}s)",
        insight.backend.as_str(),
        insight.host,
        insight.model,
        insight.timeout.as_secs()
    );
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // Parse allowed CORS origins from environment (comma-separated)
    let allowed_origins: Vec<String> = std::env::var("NEXUS_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !allowed_origins.is_empty() {
        println!("   Allowed origins: {}", allowed_origins.join(", "));
    }

    println!();
    println!("   Press Ctrl+C to stop");

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;

    let config = nexus_server::ServerConfig {
        allowed_origins,
        insight,
    };
    nexus_server::serve(host, port, static_dir_str, config).await?;

    Ok(())
}
