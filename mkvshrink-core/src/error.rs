//! Error types for the mkvshrink core library.

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for mkvshrink
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Track inspection failed for {path}: {message}")]
    Inspection { path: PathBuf, message: String },

    #[error("Encode failed for {path} (exit status {status}): {stderr}")]
    Encode {
        path: PathBuf,
        status: i32,
        stderr: String,
    },

    #[error("Remux failed for {path} (exit status {status}): {stderr}")]
    Remux {
        path: PathBuf,
        status: i32,
        stderr: String,
    },

    #[error("Invalid resolution '{token}'. Choose {accepted}.")]
    InvalidResolution { token: String, accepted: String },

    #[error("Invalid path: {0}")]
    PathError(String),

    #[error("No processable video files found in input directory")]
    NoFilesFound,
}

/// Result type for mkvshrink operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
