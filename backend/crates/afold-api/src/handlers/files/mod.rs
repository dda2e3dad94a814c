//! Job result browsing
//!
//! ## Endpoints
//! - GET /jobs/{job_id}/browse[/{path}] - directory listing, or download for a file
//! - GET /jobs/{job_id}/download/{path} - attachment
//! - GET /jobs/{job_id}/view-image/{path} - inline `image/png`
//! - GET /jobs/{job_id}/view-text/{path} - inline `text/plain`
//!
//! Every caller-supplied path is resolved through the job's `PathSandbox`:
//! 403 `Access denied.` for escapes, 404 `File or directory not found.` for
//! missing targets, 404 `Job not found.` for unknown jobs.

mod browse;
mod serve;

pub use browse::{browse_job, browse_path};
pub use serve::{download_file, view_image, view_text};
