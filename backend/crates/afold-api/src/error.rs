//! HTTP error mapping.
//!
//! Library errors are converted at the handler boundary; bodies are short
//! plain-text messages so that "not found" and "access denied" stay
//! distinguishable for scripts as well as browsers.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use afold_filestore::FilestoreError;
use afold_jobs::JobsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Job not found.")]
    JobNotFound,

    #[error("Access denied.")]
    AccessDenied,

    #[error("File or directory not found.")]
    FileNotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::JobNotFound | ApiError::FileNotFound => StatusCode::NOT_FOUND,
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

impl From<FilestoreError> for ApiError {
    fn from(err: FilestoreError) -> Self {
        match err {
            FilestoreError::JobNotFound(_) => ApiError::JobNotFound,
            FilestoreError::NotFound(_) => ApiError::FileNotFound,
            FilestoreError::AccessDenied(_) => ApiError::AccessDenied,
            FilestoreError::Io(e) => {
                log::error!("Filesystem error while serving job content: {}", e);
                ApiError::Internal("Internal server error.".to_string())
            },
        }
    }
}

impl From<JobsError> for ApiError {
    fn from(err: JobsError) -> Self {
        match err {
            JobsError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            JobsError::LaunchFailure(msg) => {
                log::error!("Job launch failed: {}", msg);
                ApiError::Internal(format!("The job could not be started: {}", msg))
            },
            other => {
                log::error!("Job service error: {}", other);
                ApiError::Internal("Internal server error.".to_string())
            },
        }
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        log::error!("Blocking task failed: {}", err);
        ApiError::Internal("Internal server error.".to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return ApiError::FileNotFound;
        }
        log::error!("I/O error while serving job content: {}", err);
        ApiError::Internal("Internal server error.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use afold_commons::JobId;

    async fn body_of(err: ApiError) -> (StatusCode, String) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn test_filestore_errors_map_to_distinct_responses() {
        let job = JobId::parse("0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(
            body_of(FilestoreError::JobNotFound(job).into()).await,
            (StatusCode::NOT_FOUND, "Job not found.".to_string())
        );
        assert_eq!(
            body_of(FilestoreError::access_denied("x").into()).await,
            (StatusCode::FORBIDDEN, "Access denied.".to_string())
        );
        assert_eq!(
            body_of(FilestoreError::not_found("x").into()).await,
            (StatusCode::NOT_FOUND, "File or directory not found.".to_string())
        );
    }

    #[actix_web::test]
    async fn test_job_errors_map_to_status_codes() {
        let (status, body) = body_of(JobsError::invalid_input("Sequence text is empty").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Sequence text is empty");

        let (status, body) = body_of(JobsError::launch_failure("cannot start worker").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("cannot start worker"));
    }
}
