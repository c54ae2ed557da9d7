//! Error types for the Strand library.
//!
//! All errors are represented by the [`StrandError`] enum. Validation failures
//! carry enough detail for a caller to report a precise diagnostic, while
//! collaborator failures (storage, I/O, JSON) wrap their source.
//!
//! # Examples
//!
//! ```
//! use strand::error::{StrandError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(StrandError::validation("missing \"value\" field"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Strand operations.
#[derive(Error, Debug)]
pub enum StrandError {
    /// I/O errors (data file access, import files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Request validation errors (missing value, malformed filter parameter)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Analysis input present but of the wrong type
    #[error("Invalid type: {0}")]
    InvalidType(String),

    /// Query parameters outside the recognized filter keys
    #[error("Invalid query parameter detected: {}.", .0.join(", "))]
    UnsupportedFilter(Vec<String>),

    /// A natural-language query that no rule could interpret
    #[error("Unable to parse natural language query: {0}")]
    UninterpretableQuery(String),

    /// Value already present in the catalog
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Value absent from the catalog
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with StrandError.
pub type Result<T> = std::result::Result<T, StrandError>;

impl StrandError {
    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        StrandError::Validation(msg.into())
    }

    /// Create a new invalid type error.
    pub fn invalid_type<S: Into<String>>(msg: S) -> Self {
        StrandError::InvalidType(msg.into())
    }

    /// Create an unsupported filter error from the offending keys.
    ///
    /// Keys are sorted and deduplicated so the message is stable regardless of
    /// input order.
    pub fn unsupported_filter<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        keys.sort();
        keys.dedup();
        StrandError::UnsupportedFilter(keys)
    }

    /// Create a new uninterpretable query error.
    pub fn uninterpretable<S: Into<String>>(query: S) -> Self {
        StrandError::UninterpretableQuery(query.into())
    }

    /// Create a new conflict error.
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        StrandError::Conflict(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        StrandError::NotFound(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        StrandError::Storage(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        StrandError::Other(msg.into())
    }

    /// Whether this error was caused by the caller's input rather than a
    /// collaborator failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StrandError::Validation(_)
                | StrandError::InvalidType(_)
                | StrandError::UnsupportedFilter(_)
                | StrandError::UninterpretableQuery(_)
                | StrandError::Conflict(_)
                | StrandError::NotFound(_)
        )
    }
}
