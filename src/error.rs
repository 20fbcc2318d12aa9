//! Error handling for the job insight application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobInsightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, JobInsightError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for JobInsightError {
    fn from(err: anyhow::Error) -> Self {
        JobInsightError::Analysis(err.to_string())
    }
}

/// Convert candle core errors to our custom error type
impl From<candle_core::Error> for JobInsightError {
    fn from(err: candle_core::Error) -> Self {
        JobInsightError::Model(err.to_string())
    }
}
