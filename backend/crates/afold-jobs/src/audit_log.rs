//! Append-only submission log shared by every request.
//!
//! Each record is one complete line written with a single `write` call on a
//! handle opened in append mode just for that record, so concurrent
//! submissions cannot interleave within a line.

use crate::error::{JobsError, Result};
use afold_commons::AuditRecord;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `record` as one line, creating the file and its parents if needed.
    pub async fn append(&self, record: &AuditRecord) -> Result<()> {
        let path = self.path.clone();
        let line = record.to_line();
        tokio::task::spawn_blocking(move || append_line(&path, &line))
            .await?
            .map_err(|e| JobsError::AuditLog(format!("cannot append to {}: {}", self.path.display(), e)))
    }

    /// Raw log content; empty when nothing was ever submitted.
    pub async fn read_all(&self) -> Result<String> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(JobsError::AuditLog(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Parsed records in file order. Lines that do not parse are skipped.
    pub async fn records(&self) -> Result<Vec<AuditRecord>> {
        let content = self.read_all().await?;
        let mut records = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match AuditRecord::parse_line(line) {
                Some(record) => records.push(record),
                None => log::debug!("Skipping malformed audit line: {:?}", line),
            }
        }
        Ok(records)
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut options = std::fs::OpenOptions::new();
    options.append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o664);
    }

    let mut file = options.open(path)?;
    file.write_all(line.as_bytes())
}
