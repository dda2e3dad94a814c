//! Job pages
//!
//! ## Endpoints
//! - GET /jobs/recent - audit log as a table
//! - GET /jobs/{job_id} - state-dependent status page

mod recent;
mod status;

pub use recent::recent_jobs;
pub use status::job_status;
