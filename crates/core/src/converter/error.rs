//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while orchestrating a conversion.
///
/// Every variant is terminal for its request; nothing is retried.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The ebook-convert binary could not be spawned.
    #[error("ebook-convert not found at path: {path}")]
    ConverterNotFound { path: PathBuf },

    /// The request was malformed before any filesystem interaction.
    #[error("invalid conversion request: {reason}")]
    InvalidRequest { reason: String },

    /// The resolved source file does not exist.
    #[error("source file not found: {path}")]
    SourceNotFound { path: String },

    /// The target's parent directory could not be created.
    #[error("failed to create output directory: {path}")]
    OutputDirectoryFailed { path: PathBuf },

    /// The converter exited with a non-zero status.
    #[error("conversion failed")]
    ConversionFailed { stderr: String, stdout: String },

    /// The converter exceeded the wall-clock ceiling and was killed.
    #[error("conversion timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The converter exited zero but produced no output file.
    #[error("conversion completed but output file not found: {path}")]
    OutputMissing { path: PathBuf },

    /// I/O error while running the converter.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates an invalid request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates a conversion failed error carrying the captured output.
    pub fn conversion_failed(stderr: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self::ConversionFailed {
            stderr: stderr.into(),
            stdout: stdout.into(),
        }
    }

    /// Captured stderr for diagnostics, if this error carries any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::ConversionFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
