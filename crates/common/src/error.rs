//! Error types shared across Shadershot crates.

use std::path::PathBuf;

/// Top-level error type for Shadershot operations.
///
/// Structural errors (`Validation`, `FileNotFound`) abort the whole batch
/// before any external process runs. `Process` covers a command that could
/// not be started at all; a command that ran but produced nothing is not an
/// error here, it surfaces as a retry-exhausted capture job instead.
#[derive(Debug, thiserror::Error)]
pub enum ShadershotError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Process error: {message}")]
    Process { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ShadershotError.
pub type ShadershotResult<T> = Result<T, ShadershotError>;

impl ShadershotError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn process(msg: impl Into<String>) -> Self {
        Self::Process {
            message: msg.into(),
        }
    }
}
