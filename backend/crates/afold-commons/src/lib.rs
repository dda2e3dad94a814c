//! # afold-commons
//!
//! Shared types and constants for the afold job server.
//!
//! This crate holds the vocabulary every other afold crate speaks:
//! - `JobId`: validated, content-derived job identifier
//! - `JobState`: the lifecycle state inferred from sentinel files
//! - `AuditRecord`: one submission event as written to the audit log
//! - `constants`: on-disk naming (sentinels, input file, working directory)
//!
//! It deliberately carries no I/O; paths are computed in `afold-filestore`
//! and processes are started in `afold-jobs`.
//!
//! ## Example Usage
//!
//! ```rust
//! use afold_commons::models::JobId;
//!
//! let job_id = JobId::parse("0123456789abcdef0123456789abcdef").unwrap();
//! assert_eq!(job_id.as_str().len(), 32);
//! assert!(JobId::parse("../etc").is_err());
//! ```

pub mod constants;
pub mod errors;
pub mod models;

pub use errors::{CommonError, Result};
pub use models::{AuditRecord, JobId, JobState};
