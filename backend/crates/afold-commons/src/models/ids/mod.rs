//! Type-safe identifier wrappers.

mod job_id;

pub use job_id::JobId;
