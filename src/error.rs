//! Error types for the task store and planner.

use thiserror::Error;

/// Failures surfaced by the task store.
///
/// The planner converts these into boolean success/failure results for the
/// front end; nothing above the planner should have to match on rusqlite
/// errors directly.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage engine failed to commit a read or write.
    #[error("storage error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// An operation referenced a task id that does not exist.
    #[error("task not found: {id}")]
    NotFound { id: String },

    /// Input rejected before reaching the store.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }

    pub fn invalid(field: &str, reason: &str) -> Self {
        StoreError::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True when the error is a missing-entity case rather than an engine
    /// failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store and planner operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
