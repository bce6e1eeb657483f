//! Error types for Bookcase Core

use thiserror::Error;

/// Result type alias using BookcaseError
pub type Result<T> = std::result::Result<T, BookcaseError>;

/// Top-level error type for all Bookcase operations
#[derive(Debug, Error)]
pub enum BookcaseError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a content store or metadata accessor
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Corrupt store: {0}")]
    Corrupt(String),
}

/// Errors that occur while reading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}
