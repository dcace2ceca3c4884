//! Unified error types for the explorer ecosystem
//!
//! [`NexError`] is the common error representation across loading,
//! statistics and display. Load-time variants (`NotFound`, `EmptyInput`,
//! `InvalidInput`) are fatal to startup; `Stats` and `Serialize` errors
//! are caught at panel granularity and rendered inline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NexError {
    /// I/O errors (file access etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A referenced network file does not exist.
    #[error("network file not found: {0}")]
    NotFound(String),

    /// After filtering out missing files, zero networks remained.
    #[error("no valid networks were loaded")]
    EmptyInput,

    /// Input was structurally unusable (wrong shape, bad label mapping).
    #[error("invalid network input: {0}")]
    InvalidInput(String),

    /// Parsing/deserialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Statistics computation errors (isolated per chart/carrier)
    #[error("statistics error: {0}")]
    Stats(String),

    /// Metadata serialization errors (distinct panel class)
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Convenience type alias for Results using NexError.
pub type NexResult<T> = Result<T, NexError>;

impl From<serde_json::Error> for NexError {
    fn from(err: serde_json::Error) -> Self {
        NexError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = NexError::Stats("misaligned series".into());
        assert!(err.to_string().contains("statistics error"));
        assert!(err.to_string().contains("misaligned series"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: NexError = io_err.into();
        assert!(matches!(err, NexError::Io(_)));
    }

    #[test]
    fn question_mark_propagates() {
        fn inner() -> NexResult<()> {
            Err(NexError::EmptyInput)
        }
        fn outer() -> NexResult<()> {
            inner()?;
            Ok(())
        }
        assert!(matches!(outer(), Err(NexError::EmptyInput)));
    }
}
