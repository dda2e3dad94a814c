//! Shared handles for request handlers.
//!
//! Built once at startup from [`JobsSettings`] and handed to actix as
//! `web::Data<AppContext>`. Everything inside is immutable; there is no job
//! table to share, only paths and configuration.

use crate::audit_log::AuditLog;
use crate::diagnostics::{DiagnosticsConfig, HostDiagnostics};
use crate::launcher::{LauncherConfig, ProcessLauncher};
use crate::status::JobStatusService;
use crate::submission::{JobSubmissionService, SubmissionPolicy};
use afold_filestore::{FileBrowser, JobLayout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Everything the job subsystem needs from the server configuration.
#[derive(Debug, Clone)]
pub struct JobsSettings {
    pub base_dir: PathBuf,
    pub audit_log_file: String,
    pub launcher: LauncherConfig,
    pub diagnostics: DiagnosticsConfig,
    pub submission: SubmissionPolicy,
    pub failed_log_max_bytes: u64,
}

pub struct AppContext {
    layout: JobLayout,

    // ===== Services =====
    browser: Arc<FileBrowser>,
    submissions: Arc<JobSubmissionService>,
    status: Arc<JobStatusService>,

    // ===== Shared resources =====
    diagnostics: Arc<HostDiagnostics>,
    audit_log: Arc<AuditLog>,

    started_at: Instant,
}

impl AppContext {
    pub fn new(settings: JobsSettings) -> Arc<Self> {
        let layout = JobLayout::new(settings.base_dir);
        let audit_log = AuditLog::new(layout.audit_log(&settings.audit_log_file));
        let diagnostics = HostDiagnostics::new(settings.diagnostics);
        let launcher = ProcessLauncher::new(layout.clone(), settings.launcher);

        let submissions = JobSubmissionService::new(settings.submission, launcher, audit_log.clone());
        let status = JobStatusService::new(
            layout.clone(),
            diagnostics.clone(),
            settings.failed_log_max_bytes,
        );

        log::debug!(
            "AppContext initialized (base_dir={}, audit_log={})",
            layout.base_dir().display(),
            audit_log.path().display()
        );

        Arc::new(Self {
            browser: Arc::new(FileBrowser::new(layout.clone())),
            submissions: Arc::new(submissions),
            status: Arc::new(status),
            diagnostics: Arc::new(diagnostics),
            audit_log: Arc::new(audit_log),
            layout,
            started_at: Instant::now(),
        })
    }

    pub fn layout(&self) -> &JobLayout {
        &self.layout
    }

    pub fn browser(&self) -> Arc<FileBrowser> {
        self.browser.clone()
    }

    pub fn submissions(&self) -> Arc<JobSubmissionService> {
        self.submissions.clone()
    }

    pub fn status(&self) -> Arc<JobStatusService> {
        self.status.clone()
    }

    pub fn diagnostics(&self) -> Arc<HostDiagnostics> {
        self.diagnostics.clone()
    }

    pub fn audit_log(&self) -> Arc<AuditLog> {
        self.audit_log.clone()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
