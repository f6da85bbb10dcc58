//! Error types for slotsearch

use thiserror::Error;

/// Main error type for slotsearch operations
#[derive(Debug, Error)]
pub enum SlotSearchError {
    /// Error in the instance or search configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid operation for the current search state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for slotsearch operations
pub type Result<T> = std::result::Result<T, SlotSearchError>;
