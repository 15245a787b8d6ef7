//! Error types for paramtree
//!
//! This module defines all error types used throughout the library.
//! Construction-time failures (absent arguments, inverted ranges) are
//! fatal; validation failures carry enough context to point at the
//! offending node.

use std::fmt;
use thiserror::Error;

/// Result type alias using paramtree Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for paramtree operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was absent
    #[error("null argument: {0}")]
    NullArgument(String),

    /// Effective minimum exceeds effective maximum
    #[error("illegal range: {0}")]
    IllegalRange(String),

    /// Constraint validation error
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Value error (invalid value for a type)
    #[error("value error: {0}")]
    Value(String),

    /// Text could not be parsed as the expected logical type
    #[error("parse error: {0}")]
    Parse(String),

    /// Schema shape with no editor support
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Constraint validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Path to the node that failed validation
    pub path: Option<String>,
    /// Original failure reason
    pub reason: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            reason: None,
        }
    }

    /// Set the node path where validation failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref reason) = self.reason {
            write!(f, "\n\nReason: {}", reason)?;
        }

        if let Some(ref path) = self.path {
            write!(f, "\n\nPath: {}", path)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("value 7 is outside the declared range")
            .with_reason("maximalInclusive is 5")
            .with_path("/parameters/retries");

        let msg = format!("{}", err);
        assert!(msg.contains("value 7 is outside the declared range"));
        assert!(msg.contains("Reason:"));
        assert!(msg.contains("Path:"));
    }

    #[test]
    fn test_error_conversion() {
        let val_err = ValidationError::new("test");
        let err: Error = val_err.into();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_fatal_errors_display() {
        let err = Error::NullArgument("type descriptor".to_string());
        assert_eq!(format!("{}", err), "null argument: type descriptor");

        let err = Error::IllegalRange("minimum 5 exceeds maximum 2".to_string());
        assert!(format!("{}", err).starts_with("illegal range:"));
    }
}
