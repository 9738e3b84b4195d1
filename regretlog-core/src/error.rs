//! Error types for regretlog-core

use thiserror::Error;

/// Main error type for the regretlog-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record is missing a field or has a field of the wrong shape
    #[error("malformed record at index {index}: {message}")]
    MalformedRecord { index: usize, message: String },

    /// A computation that needs at least one input was given none
    #[error("{computation} requires at least one input, got none")]
    EmptyInput { computation: &'static str },

    /// Invalid argument to a computation (e.g. a zero window size)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Analysis not found
    #[error("analysis not found: {0}")]
    AnalysisNotFound(String),
}

/// Result type alias for regretlog-core
pub type Result<T> = std::result::Result<T, Error>;
