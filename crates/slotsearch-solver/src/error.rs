//! Error types for running a search.

use std::path::PathBuf;

use slotsearch_config::ConfigError;
use slotsearch_core::SlotSearchError;
use thiserror::Error;

/// Errors reading or writing a checkpoint directory.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("checkpoint file missing: {0}")]
    Missing(PathBuf),

    #[error("inconsistent checkpoint: {0}")]
    Inconsistent(String),
}

/// Errors from building or running a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error(transparent)]
    Core(#[from] SlotSearchError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Result type for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
