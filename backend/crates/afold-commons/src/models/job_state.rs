use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a job as observed on disk.
///
/// The state is never stored; it is re-derived from sentinel files on every
/// request. Priority when several sentinels are present at once:
/// `Finished` > `Failed` > `Running` > `QueuedOrUnstarted`.
///
/// ```text
/// (no dir) NotFound
///             │ input written
///             ▼
///   QueuedOrUnstarted ──running.txt──▶ Running ──finished.txt──▶ Finished
///                                         │
///                                         └──failed.txt──▶ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    NotFound,
    QueuedOrUnstarted,
    Running,
    Finished,
    Failed,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::NotFound => "not_found",
            JobState::QueuedOrUnstarted => "queued_or_unstarted",
            JobState::Running => "running",
            JobState::Finished => "finished",
            JobState::Failed => "failed",
        }
    }

    /// Finished and failed jobs will not change state again unless the
    /// worker is re-run by hand.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Finished | JobState::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
