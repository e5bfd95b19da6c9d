//! # Error Types
//!
//! Errors raised by the walker and by configuration loading. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error raised while traversing a value graph.
///
/// `E` is the error type of the visit callback; a callback failure aborts
/// the traversal and is surfaced unchanged as [`WalkError::Aborted`].
#[derive(Error, Debug)]
pub enum WalkError<E> {
    /// The root was not a populated reference to a traversable value.
    #[error("invalid root: {0}")]
    InvalidRoot(String),

    /// Traversal descended past the configured depth limit.
    #[error("maximum traversal depth {limit} exceeded at '{path}'")]
    DepthExceeded {
        /// Configured depth limit.
        limit: usize,
        /// Dotted path of the node that exceeded the limit.
        path: String,
    },

    /// The visit callback returned an error.
    #[error("traversal aborted: {0}")]
    Aborted(E),
}

/// Error loading a [`crate::ValidatorConfig`] from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was present but empty.
    #[error("{var} must not be empty")]
    Empty {
        /// Environment variable name.
        var: &'static str,
    },

    /// A variable could not be parsed into the expected type.
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        /// Environment variable name.
        var: &'static str,
        /// Raw value found in the environment.
        value: String,
        /// Parse failure description.
        reason: String,
    },
}
