//! Type-safe models shared across afold crates.

pub mod ids;

mod audit_record;
mod job_state;

pub use audit_record::AuditRecord;
pub use ids::JobId;
pub use job_state::JobState;
