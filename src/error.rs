//! Error types for the review analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Please enter some reviews to analyze!")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sentiment label: {0}")]
    InvalidLabel(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalyzerError {
    /// True for the user-facing "nothing to analyze" condition
    pub fn is_empty_input(&self) -> bool {
        matches!(self, AnalyzerError::EmptyInput)
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
