use std::path::PathBuf;
use thiserror::Error;

use crate::decode::DecodeError;

/// Custom error types for audiocheck
#[derive(Error, Debug)]
pub enum AudiocheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    #[error("Failed to parse ffprobe output: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(
        "Output audio {path} should have duration = {expected}, but got {actual}."
    )]
    IncorrectDuration {
        path: PathBuf,
        expected: f64,
        actual: f64,
    },

    #[error("Unable to open output file {path}: {source}")]
    UnopenableFile {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

/// Result type for audiocheck operations
pub type Result<T> = std::result::Result<T, AudiocheckError>;
