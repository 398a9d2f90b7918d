//! Store error types

use std::fmt;

use thiserror::Error;

/// Operation being performed when the store error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    FindById,
    List,
    Insert,
    Replace,
    Remove,
    Count,
    Exists,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindById => write!(f, "find_by_id"),
            Self::List => write!(f, "list"),
            Self::Insert => write!(f, "insert"),
            Self::Replace => write!(f, "replace"),
            Self::Remove => write!(f, "remove"),
            Self::Count => write!(f, "count"),
            Self::Exists => write!(f, "exists"),
        }
    }
}

/// Structured store error with operation context
///
/// The in-memory backend cannot fail in practice, but the contract keeps the
/// error channel so a relational backend can slot in behind [`super::EntityStore`]
/// without changing callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("store {operation} failed: {message}")]
pub struct StoreError {
    /// The operation being performed when the error occurred
    pub operation: StoreOperation,
    /// Human-readable error message
    pub message: String,
}

impl StoreError {
    pub fn new(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_operation() {
        let err = StoreError::new(StoreOperation::Insert, "connection lost");
        assert_eq!(err.to_string(), "store insert failed: connection lost");
    }

    #[test]
    fn operation_display() {
        assert_eq!(StoreOperation::FindById.to_string(), "find_by_id");
        assert_eq!(StoreOperation::Remove.to_string(), "remove");
    }
}
