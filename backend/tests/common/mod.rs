//! Shared helpers for HTTP-level tests.
//!
//! Each `TestServer` owns a fresh temporary job store and an `AppContext`
//! wired exactly like the production server, minus the listener. Host
//! diagnostics are replaced by `echo` so page content is deterministic.

#![allow(dead_code)]

use actix_web::web;
use afold_commons::JobId;
use afold_jobs::AppContext;
use afold_server::config::ServerConfig;
use afold_server::lifecycle;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const QUEUE_SNAPSHOT: &str = "QUEUE-SNAPSHOT";
pub const DEVICE_SNAPSHOT: &str = "GPU-SNAPSHOT";
pub const CLIENT_IP: &str = "203.0.113.9";

pub struct TestServer {
    pub dir: TempDir,
    pub config: ServerConfig,
    pub app_context: Arc<AppContext>,
}

impl TestServer {
    /// Server whose worker exits immediately.
    pub async fn new() -> Self {
        Self::with_worker("true").await
    }

    pub async fn with_worker(program: impl AsRef<Path>) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let mut config = ServerConfig::default();
        config.storage.base_output_dir = dir.path().join("jobs").display().to_string();
        config.worker.program = program.as_ref().display().to_string();
        config.diagnostics.queue_command = vec!["echo".to_string(), QUEUE_SNAPSHOT.to_string()];
        config.diagnostics.device_command = vec!["echo".to_string(), DEVICE_SNAPSHOT.to_string()];
        config.diagnostics.timeout_seconds = 5;

        let app_context = lifecycle::bootstrap(&config).await.expect("bootstrap");
        Self {
            dir,
            config,
            app_context,
        }
    }

    pub fn app_config(&self) -> impl Fn(&mut web::ServiceConfig) + Clone {
        lifecycle::app_config(self.app_context.clone(), &self.config)
    }

    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.base_output_dir)
    }

    pub fn audit_log_path(&self) -> PathBuf {
        self.base_dir().join(&self.config.storage.audit_log_file)
    }

    /// Creates the job directory and its working directory, no sentinel.
    pub fn create_job(&self, job_id: &str) -> JobId {
        let job_id = JobId::parse(job_id).expect("valid job id");
        let layout = self.app_context.layout();
        std::fs::create_dir_all(layout.work_dir(&job_id)).expect("create job dirs");
        job_id
    }

    pub fn job_dir(&self, job_id: &JobId) -> PathBuf {
        self.app_context.layout().job_dir(job_id)
    }

    /// Writes `content` at `rel` under the job directory, creating parents.
    pub fn write_job_file(&self, job_id: &JobId, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.job_dir(job_id).join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, content).expect("write job file");
        path
    }
}

/// Shell-script worker that records `$IBSJOBNAME|$1|$2|$(pwd)` into
/// `seen.txt` in its working directory.
#[cfg(unix)]
pub fn recording_worker(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let script = dir.join("worker.sh");
    std::fs::write(
        &script,
        "#!/bin/sh\nprintf '%s|%s|%s|%s' \"$IBSJOBNAME\" \"$1\" \"$2\" \"$(pwd)\" > seen.tmp\nmv seen.tmp seen.txt\n",
    )
    .expect("write worker");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).expect("chmod worker");
    script
}

/// Polls until `path` exists and returns its content.
pub async fn wait_for_file(path: &Path) -> String {
    for _ in 0..100 {
        if let Ok(content) = std::fs::read_to_string(path) {
            return content;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("{} never appeared", path.display());
}
