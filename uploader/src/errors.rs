//! Error types for the Delta uploader

use thiserror::Error;

/// Main error type for the Delta uploader
#[derive(Error, Debug)]
pub enum UploaderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    HttpError(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest backend
    #[error("{0}")]
    Transport(String),

    /// The deal endpoint answered with a non-success status
    #[error("Upload failed")]
    UploadFailed,

    /// The status endpoint answered with a non-success status
    #[error("Request failed")]
    RequestFailed,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
