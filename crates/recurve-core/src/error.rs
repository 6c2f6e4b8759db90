//! Error types shared across the engine.

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Engine error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RetentionError {
    /// Topic log not found
    #[error("Topic not found: {0}")]
    NotFound(String),
    /// Structurally invalid numeric state or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Store backend failure
    #[error("Store error: {0}")]
    Store(String),
}

/// Engine result type
pub type Result<T> = std::result::Result<T, RetentionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RetentionError::NotFound("topic-42".to_string());
        assert_eq!(err.to_string(), "Topic not found: topic-42");

        let err = RetentionError::InvalidInput("stability must be positive".to_string());
        assert!(err.to_string().starts_with("Invalid input:"));
    }
}
