//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations.
///
/// None of these are fatal: every failure leaves the in-memory store in its
/// last known good state.
#[derive(Debug, Error)]
pub enum BoardError {
    /// User input failed a precondition (empty name or title, unknown column)
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The operation would break a structural guarantee
    #[error("refused: {message}")]
    InvariantViolation { message: String },

    /// Persisted data does not parse or does not have the expected shape
    #[error("corrupt data: {message}")]
    CorruptData { message: String },

    /// An import file was rejected
    #[error("import failed: {message}")]
    Import { message: String },

    /// Writing the persisted state failed
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Project not found
    #[error("project not found: {id}")]
    ProjectNotFound { id: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invariant violation
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create a corrupt data error
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptData {
            message: message.into(),
        }
    }

    /// Create an import error
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Check if this error came from rejected user input or a refused operation,
    /// as opposed to data or storage trouble
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::InvariantViolation { .. } | Self::ProjectNotFound { .. }
        )
    }

    /// Every error in this system is recoverable
    pub fn is_recoverable(&self) -> bool {
        true
    }
}
