//! # afold-api
//!
//! HTTP surface of the afold job server: submission form, job status pages,
//! sandboxed result browsing and the audit table.
//!
//! Handlers receive `web::Data<Arc<AppContext>>` and never touch the
//! filesystem directly; paths go through `afold-filestore`, job operations
//! through `afold-jobs`.

pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;

pub use error::ApiError;
pub use routes::configure_routes;
