//! Sentinel files → job state.
//!
//! The worker writes sentinels from another process, so several may be
//! visible at once and any of them may appear between two checks. The
//! priority order below is the tie-break; first match wins:
//!
//! 1. job directory missing      → `NotFound`
//! 2. `finished.txt`             → `Finished`
//! 3. `failed.txt`               → `Failed`
//! 4. `running.txt`              → `Running`
//! 5. nothing yet                → `QueuedOrUnstarted`
//!
//! Nothing is written, cached or deleted here.

use afold_commons::{JobId, JobState};
use afold_filestore::JobLayout;

/// Derives the current state of `job_id` from the filesystem.
///
/// Blocking (a handful of `stat` calls); run it off the async executor.
pub fn resolve_state(layout: &JobLayout, job_id: &JobId) -> JobState {
    if !layout.job_dir(job_id).is_dir() {
        return JobState::NotFound;
    }
    if layout.finished_sentinel(job_id).exists() {
        return JobState::Finished;
    }
    if layout.failed_sentinel(job_id).exists() {
        return JobState::Failed;
    }
    if layout.running_sentinel(job_id).exists() {
        return JobState::Running;
    }
    JobState::QueuedOrUnstarted
}
