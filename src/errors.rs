//! Error types for assessment operations

use thiserror::Error;

/// Main error type for the assessment core
#[derive(Error, Debug)]
pub enum AssessmentError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Inference client transport failure
    #[error("Inference error: {0}")]
    Inference(String),

    /// Invalid state or operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to store record: {0}")]
    StoreFailed(String),

    #[error("Failed to retrieve record: {0}")]
    RetrieveFailed(String),

    #[error("Failed to list records: {0}")]
    ListFailed(String),

    #[error("Failed to delete record: {0}")]
    DeleteFailed(String),
}

/// Result type alias for assessment operations
pub type Result<T> = std::result::Result<T, AssessmentError>;
