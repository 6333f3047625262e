//! Error types for Nexus

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset has no 'timestamp' column")]
    MissingTimestamp,

    #[error("Dataset has no numeric columns to chart or summarize")]
    NoNumericColumns,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Whether the error is caused by the shape of user-supplied data
    /// rather than by the environment.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MissingTimestamp | Self::NoNumericColumns | Self::InvalidData(_) | Self::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
