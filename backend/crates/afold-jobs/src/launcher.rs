//! Launch-and-detach of the external prediction worker.
//!
//! The launcher's contract ends at a successful spawn. It never waits on the
//! child, never reads its pipes and never kills it; the worker reports progress
//! only through sentinel files. Exit statuses are collected in the background
//! by the tokio runtime, so finished workers do not linger as zombies.

use crate::error::{JobsError, Result};
use afold_commons::JobId;
use afold_filestore::JobLayout;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Unix mode for the submitted input file: the worker runs as another member
/// of the same group and may rewrite it.
#[cfg(unix)]
const INPUT_FILE_MODE: u32 = 0o664;

/// How the worker is invoked.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Worker executable
    pub program: PathBuf,
    /// Second positional argument after the input file path
    pub policy: String,
    /// Environment variable carrying the job id into the worker
    pub job_name_env: String,
}

/// Result of a successful launch.
#[derive(Debug, Clone)]
pub struct LaunchedJob {
    pub job_id: JobId,
    pub input_file: PathBuf,
    /// OS pid of the detached worker, when the platform reports one
    pub pid: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    layout: JobLayout,
    config: LauncherConfig,
}

impl ProcessLauncher {
    pub fn new(layout: JobLayout, config: LauncherConfig) -> Self {
        Self { layout, config }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Materializes the input file and starts the worker.
    ///
    /// Idempotent for an existing job id: the directory is reused and the
    /// input file overwritten. Any failure is a `LaunchFailure`; a directory
    /// left behind by a failed spawn reads as "queued or unstarted".
    pub async fn launch(&self, job_id: &JobId, payload: &str) -> Result<LaunchedJob> {
        let job_dir = self.layout.job_dir(job_id);
        tokio::fs::create_dir_all(&job_dir).await.map_err(|e| {
            JobsError::launch_failure(format!(
                "cannot create job directory {}: {}",
                job_dir.display(),
                e
            ))
        })?;

        let input_file = self.layout.input_file(job_id);
        tokio::fs::write(&input_file, payload.as_bytes()).await.map_err(|e| {
            JobsError::launch_failure(format!(
                "cannot write input file {}: {}",
                input_file.display(),
                e
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&input_file, std::fs::Permissions::from_mode(INPUT_FILE_MODE))
                .await
                .map_err(|e| {
                    JobsError::launch_failure(format!(
                        "cannot set permissions on {}: {}",
                        input_file.display(),
                        e
                    ))
                })?;
        }

        let mut command = Command::new(&self.config.program);
        command
            .arg(&input_file)
            .arg(&self.config.policy)
            .current_dir(&job_dir)
            .env(&self.config.job_name_env, job_id.as_str())
            .stdin(Stdio::null())
            .kill_on_drop(false);

        // Own process group: a Ctrl-C or SIGTERM aimed at the server must not
        // take hours of GPU work down with it.
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn().map_err(|e| {
            JobsError::launch_failure(format!(
                "cannot start worker {}: {}",
                self.config.program.display(),
                e
            ))
        })?;
        let pid = child.id();
        drop(child);

        log::info!(
            "Launched worker for job {} (pid={:?}, program={}, cwd={})",
            job_id,
            pid,
            self.config.program.display(),
            job_dir.display()
        );

        Ok(LaunchedJob {
            job_id: job_id.clone(),
            input_file,
            pid,
        })
    }
}
