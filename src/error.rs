//! Error handling for the workforce analytics engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkforceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    DataUnavailable(String),

    #[error("Industry {0} not found")]
    IndustryNotFound(String),

    #[error("Job {title} not found in {industry}")]
    JobNotFound { industry: String, title: String },

    #[error("{0}")]
    Extraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

impl WorkforceError {
    /// Data-absence and lookup misses are reported back to the caller as an
    /// `{ "error": ... }` payload instead of aborting the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WorkforceError::DataUnavailable(_)
                | WorkforceError::IndustryNotFound(_)
                | WorkforceError::JobNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, WorkforceError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for WorkforceError {
    fn from(err: anyhow::Error) -> Self {
        WorkforceError::AnalysisFailed(err.to_string())
    }
}
