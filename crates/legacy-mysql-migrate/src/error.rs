//! Error types for the migration library.

use thiserror::Error;

/// Main error type for migration operations.
///
/// Per-object migration failures never surface here; they degrade to
/// error entries in the migration log so sibling objects keep migrating.
/// This type is reserved for caller contract violations.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration error (unknown dialect, bad parameter value, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A migration method could not be resolved or invoked
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

impl MigrateError {
    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        MigrateError::Config(message.into())
    }

    /// Create a Dispatch error
    pub fn dispatch(message: impl Into<String>) -> Self {
        MigrateError::Dispatch(message.into())
    }
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
