//! Common error types for EBM

use thiserror::Error;

/// Common result type for EBM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across EBM modules
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or malformed field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local draft storage is out of space
    #[error("Storage quota exceeded: {0}")]
    StorageQuota(String),

    /// Generic local draft storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// HTTP transport error talking to the submissions server
    #[error("HTTP error: {0}")]
    Http(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
