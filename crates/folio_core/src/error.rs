//! Core error types

use thiserror::Error;

/// Errors raised by host abstractions and effects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// A selector string could not be parsed
    #[error("Invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    /// An element the operation depends on is not in the document
    #[error("Required element not found: {0}")]
    MissingElement(String),

    /// An element attribute holds a value the effect cannot use
    #[error("Invalid value `{value}` for attribute `{name}`")]
    InvalidAttribute { name: String, value: String },

    /// Host environment failure (browser API rejected a call)
    #[error("Host error: {0}")]
    Host(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, FolioError>;
