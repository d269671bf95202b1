use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, merging, or writing annotation data.
#[derive(Debug, Error)]
pub enum SoftNerError {
    /// A supplied document path does not exist.
    #[error("input file not found: {}", path.display())]
    InputNotFound {
        /// The path that could not be resolved.
        path: PathBuf,
    },

    /// A document on disk is not valid annotation JSON.
    #[error("malformed document {}: {reason}", path.display())]
    MalformedDocument {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// An in-memory document failed validation.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed outside of document loading.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

impl SoftNerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for softner operations.
pub type Result<T> = std::result::Result<T, SoftNerError>;
