//! Nexus CLI - Digital twin sensor insights
//!
//! Usage:
//!   nexus sample --domain co2         Generate a 24 hour sample
//!   nexus describe --file data.csv    Show statistics and correlations
//!   nexus analyze --domain radiation  Ask the local model for insights
//!   nexus serve --port 3000           Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Sample { domain, format } => commands::cmd_sample(domain, format),
        Commands::Describe { source } => commands::cmd_describe(&source),
        Commands::Analyze {
            source,
            model,
            host,
        } => {
            let config =
                commands::load_config(config_path, host.as_deref(), model.as_deref())?;
            commands::cmd_analyze(&source, &config).await
        }
        Commands::Ollama { action } => match action {
            OllamaAction::Status => {
                let config = commands::load_config(config_path, None, None)?;
                commands::cmd_ollama_status(&config).await
            }
        },
        Commands::Prompts { action } => match action {
            None | Some(PromptsAction::List) => commands::cmd_prompts_list(),
            Some(PromptsAction::Show { id }) => commands::cmd_prompts_show(&id),
            Some(PromptsAction::Path) => commands::cmd_prompts_path(),
        },
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let config = commands::load_config(config_path, None, None)?;
            commands::cmd_serve(&host, port, static_dir.as_deref(), config).await
        }
    }
}
