use thiserror::Error;

/// Errors from job submission and inspection.
#[derive(Error, Debug)]
pub enum JobsError {
    /// Submission rejected before any side effect
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Directory, input file or worker spawn failed; the submission is aborted
    #[error("Launch failure: {0}")]
    LaunchFailure(String),

    #[error("Audit log error: {0}")]
    AuditLog(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl JobsError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn launch_failure(msg: impl Into<String>) -> Self {
        Self::LaunchFailure(msg.into())
    }
}

impl From<tokio::task::JoinError> for JobsError {
    fn from(err: tokio::task::JoinError) -> Self {
        JobsError::Internal(format!("blocking task failed: {}", err))
    }
}

/// Result type for job operations
pub type Result<T> = std::result::Result<T, JobsError>;
