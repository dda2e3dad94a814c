//! Server-level endpoints
//!
//! ## Endpoints
//! - GET / - redirect to the submission form
//! - GET /healthcheck - liveness and build information
//! - GET /favicon.ico - site icon

mod favicon;
mod healthcheck;

pub use favicon::favicon_handler;
pub use healthcheck::{healthcheck_handler, index_handler};
