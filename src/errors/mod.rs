// Store error taxonomy shared by every service and handler, built on thiserror.
use std::path::PathBuf;
use thiserror::Error;

pub mod response;
pub mod validation;

// Re-export commonly used types
pub use validation::ValidationError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Task {0} is already completed")]
    AlreadyCompleted(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Filesystem failures while reading or replacing a document.
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Corrupt document {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl StoreError {
    pub fn task_not_found(task_id: &str) -> Self {
        StoreError::NotFound(format!("task {}", task_id))
    }

    /// Recoverable errors go back to the caller as-is; the rest mean the
    /// operation was aborted and the on-disk document is still the last good one.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Auth(_)
            | StoreError::Forbidden(_)
            | StoreError::NotFound(_)
            | StoreError::AlreadyExists(_)
            | StoreError::AlreadyCompleted(_)
            | StoreError::Validation(_) => true,
            StoreError::File(_) | StoreError::Corrupt { .. } | StoreError::Hash(_) => false,
        }
    }
}

// Custom result type
pub type StoreResult<T> = Result<T, StoreError>;
