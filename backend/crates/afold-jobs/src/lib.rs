//! # afold-jobs
//!
//! Job lifecycle for afold: from an inbound submission to a detached worker
//! process, and back from sentinel files to a status page.
//!
//! ## Components
//!
//! - **identity**: content digest → [`JobId`](afold_commons::JobId)
//! - **sequence**: server-side FASTA normalization and validation
//! - **launcher**: writes the input file and spawns the worker, fire-and-forget
//! - **state_resolver**: pure projection of sentinel files to a `JobState`
//! - **status**: state plus failure log or host diagnostics
//! - **diagnostics**: queue / device status commands with a timeout
//! - **audit_log**: append-only submission log
//! - **submission**: composes the above into one `submit` call
//!
//! ## Job Lifecycle
//! ```text
//! POST /submit ─▶ identity ─▶ launcher ─▶ audit_log ─▶ 303 /jobs/{id}
//!
//! GET /jobs/{id} ─▶ state_resolver ─┬─ Finished ─▶ browse link
//!                                   ├─ Failed   ─▶ worker log tail
//!                                   ├─ Running  ─▶ squeue + nvidia-smi
//!                                   └─ Queued / NotFound ─▶ guidance
//! ```
//!
//! There is no job table: the filesystem is the only source of truth and every
//! status request re-derives the state.

pub mod app_context;
pub mod audit_log;
pub mod diagnostics;
pub mod error;
pub mod identity;
pub mod launcher;
pub mod sequence;
pub mod state_resolver;
pub mod status;
pub mod submission;

pub use app_context::{AppContext, JobsSettings};
pub use audit_log::AuditLog;
pub use diagnostics::{DiagnosticError, DiagnosticsConfig, HostDiagnostics};
pub use error::{JobsError, Result};
pub use identity::{job_id_for, normalize_submission};
pub use launcher::{LaunchedJob, LauncherConfig, ProcessLauncher};
pub use sequence::SequenceSubmission;
pub use state_resolver::resolve_state;
pub use status::{JobStatusReport, JobStatusService, StatusDetail};
pub use submission::{JobSubmissionService, SubmissionPolicy, SubmissionRequest, SubmittedJob};
