//! Job submission
//!
//! ## Endpoints
//! - GET /submit - submission form with the live queue snapshot
//! - POST /submit - validate, launch, audit, then 303 to `/jobs/{job_id}`

pub mod models;

mod form;
mod post;

pub use form::submit_form;
pub use post::submit_job;
