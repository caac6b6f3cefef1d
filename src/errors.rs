//! Error types for computable operations
//!
//! Only call-site misuse and store bookkeeping produce errors. Data-shape
//! problems (missing collections, unparsable numbers, nullish strings) are
//! absorbed by the transforms and yield a safe default value instead.

use thiserror::Error;

/// Errors that can occur when declaring or evaluating derived fields
#[derive(Debug, Clone, Error)]
pub enum ComputableError {
    /// A declaration-time precondition was violated
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// A replacement pattern could not be compiled
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// A field with this name is already installed on the store
    #[error("Field already defined: {0}")]
    DuplicateField(String),

    /// Attempted to assign to a derived field
    #[error("Field is derived and cannot be set: {0}")]
    ReadOnlyField(String),

    /// A dotted write used a named segment where an array index is needed
    #[error("Cannot write {key}: {segment:?} is not an array index")]
    InvalidPath {
        /// The full key being written
        key: String,
        /// The segment that landed on an array
        segment: String,
    },

    /// A derived field transitively depends on itself
    #[error("Dependency cycle while computing {key}: {}", chain.join(" -> "))]
    Cycle {
        /// The field whose recomputation re-entered itself
        key: String,
        /// Fields being computed when the cycle was detected, outermost first
        chain: Vec<String>,
    },

    /// Nested recomputation went deeper than the configured limit
    #[error("Recomputation depth {depth} exceeded while computing {key}")]
    DepthExceeded {
        /// The field that would have exceeded the limit
        key: String,
        /// The configured limit
        depth: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for computable operations
pub type ComputableResult<T> = Result<T, ComputableError>;

impl From<regex::Error> for ComputableError {
    fn from(err: regex::Error) -> Self {
        ComputableError::InvalidPattern(err.to_string())
    }
}

impl From<serde_json::Error> for ComputableError {
    fn from(err: serde_json::Error) -> Self {
        ComputableError::Serialization(err.to_string())
    }
}
