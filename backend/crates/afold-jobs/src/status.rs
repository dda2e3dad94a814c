use crate::diagnostics::HostDiagnostics;
use crate::error::{JobsError, Result};
use crate::state_resolver::resolve_state;
use afold_commons::{JobId, JobState};
use afold_filestore::JobLayout;
use serde::Serialize;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// State-specific extras shown next to the job state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusDetail {
    None,
    Failed {
        /// Worker log, or its tail when larger than the configured cap
        log: Option<String>,
        truncated: bool,
    },
    Running {
        queue: String,
        devices: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStatusReport {
    pub job_id: JobId,
    pub state: JobState,
    pub detail: StatusDetail,
}

/// Resolves a job's state and gathers whatever the status page shows for it.
#[derive(Debug, Clone)]
pub struct JobStatusService {
    layout: JobLayout,
    diagnostics: HostDiagnostics,
    failed_log_max_bytes: u64,
}

impl JobStatusService {
    pub fn new(layout: JobLayout, diagnostics: HostDiagnostics, failed_log_max_bytes: u64) -> Self {
        Self {
            layout,
            diagnostics,
            failed_log_max_bytes,
        }
    }

    pub async fn state(&self, job_id: &JobId) -> Result<JobState> {
        let layout = self.layout.clone();
        let job_id = job_id.clone();
        Ok(tokio::task::spawn_blocking(move || resolve_state(&layout, &job_id)).await?)
    }

    pub async fn report(&self, job_id: &JobId) -> Result<JobStatusReport> {
        let state = self.state(job_id).await?;
        let detail = match state {
            JobState::Failed => {
                let path = self.layout.worker_log(job_id);
                let cap = self.failed_log_max_bytes;
                let (log, truncated) =
                    tokio::task::spawn_blocking(move || read_log_tail(&path, cap)).await??;
                StatusDetail::Failed { log, truncated }
            },
            JobState::Running => {
                let (queue, devices) =
                    tokio::join!(self.diagnostics.queue_text(), self.diagnostics.device_text());
                StatusDetail::Running { queue, devices }
            },
            _ => StatusDetail::None,
        };

        log::debug!("Job {} resolved to {}", job_id, state);
        Ok(JobStatusReport {
            job_id: job_id.clone(),
            state,
            detail,
        })
    }
}

/// Reads at most `max_bytes` from the end of `path`.
///
/// A missing log is `Ok((None, false))`: the worker may fail before writing one.
fn read_log_tail(path: &Path, max_bytes: u64) -> Result<(Option<String>, bool)> {
    let mut file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok((None, false)),
        Err(e) => {
            return Err(JobsError::Internal(format!(
                "cannot open worker log {}: {}",
                path.display(),
                e
            )))
        },
    };

    let io_err =
        |e: std::io::Error| JobsError::Internal(format!("cannot read worker log {}: {}", path.display(), e));

    let len = file.metadata().map_err(io_err)?.len();
    let truncated = len > max_bytes;
    if truncated {
        file.seek(SeekFrom::Start(len - max_bytes)).map_err(io_err)?;
    }

    let mut bytes = Vec::with_capacity(len.min(max_bytes) as usize);
    file.take(max_bytes).read_to_end(&mut bytes).map_err(io_err)?;
    Ok((Some(String::from_utf8_lossy(&bytes).into_owned()), truncated))
}
