//! Error types for the value crate.

use thiserror::Error;

/// Errors raised while building or marshaling an environment.
#[derive(Debug, Error)]
pub enum ValueError {
    /// The top level of a serialized environment was not a map.
    #[error("environment must be a map of names to values, got {found}")]
    NotAMap { found: &'static str },

    /// A value could not be serialized.
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An environment entry has no structural representation.
    #[error("failed to marshal {key}: {message}")]
    Marshal { key: String, message: String },
}

/// Result type for value operations.
pub type Result<T> = std::result::Result<T, ValueError>;
