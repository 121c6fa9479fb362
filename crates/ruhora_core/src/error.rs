//! Core error types

use thiserror::Error;

/// Errors raised by the core runtime
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// No element carries the requested label
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// Viewport thresholds are fractions of the viewport height
    #[error("Viewport threshold out of range (expected 0.0..=1.0): {0}")]
    InvalidThreshold(f32),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
