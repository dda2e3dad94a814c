use afold_commons::constants::{
    FAILED_SENTINEL, FINISHED_SENTINEL, INPUT_FILE_EXTENSION, INPUT_FILE_PREFIX,
    RUNNING_SENTINEL, WORKER_LOG_EXTENSION, WORK_DIR_SUFFIX,
};
use afold_commons::JobId;
use std::path::{Path, PathBuf};

/// Consistent paths for everything a job owns on disk.
///
/// ```text
/// {base}/{job_id}/
/// ├── input_{job_id}.fasta            written by the launcher
/// ├── input_{job_id}_full_dbs.log     written by the worker
/// └── input_{job_id}_full_dbs/        worker output
///     ├── running.txt | finished.txt | failed.txt
///     └── ...
/// ```
///
/// Only [`JobId`] values are joined onto the base directory, never raw
/// request strings.
#[derive(Debug, Clone)]
pub struct JobLayout {
    base_dir: PathBuf,
}

impl JobLayout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Root under which all job directories and the audit log live
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn job_dir(&self, job_id: &JobId) -> PathBuf {
        self.base_dir.join(job_id.as_str())
    }

    /// `input_{job_id}`, the stem shared by the input file, working directory and log
    pub fn input_stem(job_id: &JobId) -> String {
        format!("{}{}", INPUT_FILE_PREFIX, job_id)
    }

    pub fn input_file_name(job_id: &JobId) -> String {
        format!("{}.{}", Self::input_stem(job_id), INPUT_FILE_EXTENSION)
    }

    pub fn input_file(&self, job_id: &JobId) -> PathBuf {
        self.job_dir(job_id).join(Self::input_file_name(job_id))
    }

    pub fn work_dir_name(job_id: &JobId) -> String {
        format!("{}{}", Self::input_stem(job_id), WORK_DIR_SUFFIX)
    }

    /// Worker output directory, where the sentinels appear
    pub fn work_dir(&self, job_id: &JobId) -> PathBuf {
        self.job_dir(job_id).join(Self::work_dir_name(job_id))
    }

    pub fn running_sentinel(&self, job_id: &JobId) -> PathBuf {
        self.work_dir(job_id).join(RUNNING_SENTINEL)
    }

    pub fn finished_sentinel(&self, job_id: &JobId) -> PathBuf {
        self.work_dir(job_id).join(FINISHED_SENTINEL)
    }

    pub fn failed_sentinel(&self, job_id: &JobId) -> PathBuf {
        self.work_dir(job_id).join(FAILED_SENTINEL)
    }

    /// Worker log next to the working directory, read when a job failed
    pub fn worker_log(&self, job_id: &JobId) -> PathBuf {
        self.job_dir(job_id).join(format!(
            "{}.{}",
            Self::work_dir_name(job_id),
            WORKER_LOG_EXTENSION
        ))
    }

    /// Shared audit log file
    pub fn audit_log(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }
}
