//! Error types for Tabfocus.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Tabfocus operations.
pub type Result<T> = std::result::Result<T, TabfocusError>;

/// Errors that can occur in Tabfocus.
#[derive(Debug, Error)]
pub enum TabfocusError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Unsupported file format.
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat {
        /// Offending file extension.
        extension: String,
    },

    /// The payload parsed, but is not one of the accepted table shapes.
    #[error("Unexpected data format: {reason}")]
    UnexpectedFormat {
        /// What was wrong with the payload.
        reason: String,
    },

    /// Failed to parse JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or parse the configuration file.
    #[error("Config error in {path}: {message}")]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TabfocusError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create an UnsupportedFormat error.
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Create an UnexpectedFormat error.
    pub fn unexpected_format(reason: impl Into<String>) -> Self {
        Self::UnexpectedFormat {
            reason: reason.into(),
        }
    }

    /// Create a Config error.
    pub fn config(path: PathBuf, message: impl Into<String>) -> Self {
        Self::Config {
            path,
            message: message.into(),
        }
    }
}
