use afold_commons::JobId;
use thiserror::Error;

/// Errors raised while resolving or reading job directory content.
///
/// `JobNotFound`, `NotFound` and `AccessDenied` are kept apart all the way to
/// the HTTP layer: operators tell absent jobs, missing files and hostile paths
/// apart by them.
#[derive(Error, Debug)]
pub enum FilestoreError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilestoreError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }
}

/// Result type for filestore operations
pub type Result<T> = std::result::Result<T, FilestoreError>;
