//! Animation error types

use thiserror::Error;

/// Errors raised when building animation state machines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// The typing effect needs at least one phrase to cycle through
    #[error("Typing effect requires at least one phrase")]
    EmptyPhraseList,

    /// A progress increment bound must be positive and finite
    #[error("Invalid progress increment bound: {0}")]
    InvalidIncrement(f32),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
