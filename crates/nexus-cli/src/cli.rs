//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nexus_core::SensorDomain;

/// Nexus - Digital twin sensor insights
#[derive(Parser)]
#[command(name = "nexus")]
#[command(about = "Synthetic sensor data and local AI insights for a digital twin", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate 24 hours of synthetic sensor data
    Sample {
        /// Sensor domain: temperature, co2, radiation
        #[arg(short, long, value_parser = parse_domain)]
        domain: SensorDomain,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the dataset digest and correlations
    Describe {
        #[command(flatten)]
        source: DataSource,
    },

    /// Ask the model for insights on a dataset
    Analyze {
        #[command(flatten)]
        source: DataSource,

        /// Model to use (overrides config and OLLAMA_MODEL)
        #[arg(short, long)]
        model: Option<String>,

        /// Ollama host URL (overrides config and OLLAMA_HOST)
        #[arg(long)]
        host: Option<String>,
    },

    /// Ollama connection commands
    Ollama {
        #[command(subcommand)]
        action: OllamaAction,
    },

    /// Manage AI prompts
    Prompts {
        #[command(subcommand)]
        action: Option<PromptsAction>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory of static frontend files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

/// Where a command reads its dataset from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct DataSource {
    /// CSV file with a timestamp column
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Generate a fresh sample for this domain instead
    #[arg(short, long, value_parser = parse_domain)]
    pub domain: Option<SensorDomain>,
}

#[derive(Subcommand)]
pub enum OllamaAction {
    /// Check that Ollama is reachable and the model is installed
    Status,
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List all prompts and their override status
    List,
    /// Show the content of a prompt
    Show {
        /// Prompt ID (e.g. analyze_environment)
        id: String,
    },
    /// Show the override directory path
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn parse_domain(s: &str) -> Result<SensorDomain, String> {
    s.parse()
}
