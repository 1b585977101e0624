/*!
 * Error types for the sinsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the transcription service
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// Error when making an upload request fails
    #[error("Upload request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing the service response fails
    #[error("Failed to parse service response: {0}")]
    ParseError(String),

    /// Error returned by the service itself
    #[error("Service responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl TranscriptionError {
    /// Whether a failed attempt may succeed if tried again.
    ///
    /// Client-side rejections (4xx) will not improve on retry; everything
    /// else is treated as transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            TranscriptionError::ApiError { status_code, .. } => *status_code >= 500,
            _ => true,
        }
    }
}

/// Errors that can occur in the local subtitle cache
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing database could not be opened or is gone
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A database operation failed after its retries were exhausted
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    /// The requested operation is not supported by the active backend
    #[error("Operation not supported by fallback storage: {0}")]
    Unsupported(String),
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp or timecode line could not be parsed
    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    /// An entry failed validation
    #[error("Invalid subtitle entry: {0}")]
    InvalidEntry(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the transcription service
    #[error("Transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// Error from the local cache
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
