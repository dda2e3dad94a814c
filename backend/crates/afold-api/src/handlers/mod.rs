//! HTTP request handlers
//!
//! - `health`: healthcheck, favicon, root redirect
//! - `submit`: submission form and POST
//! - `jobs`: status page and recent submissions
//! - `files`: browse, download and inline views of job output

pub mod files;
pub mod health;
pub mod jobs;
pub mod submit;

use crate::error::ApiError;
use afold_commons::JobId;

/// A job id taken from the URL. Anything that is not a well-formed id cannot
/// name a job directory and is reported as a missing job.
pub(crate) fn parse_job_id(raw: &str) -> Result<JobId, ApiError> {
    JobId::parse(raw).map_err(|_| ApiError::JobNotFound)
}
