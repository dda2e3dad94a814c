//! Read-only host diagnostics: the cluster queue and the GPU status.
//!
//! The commands' stdout is passed through verbatim. Any failure becomes
//! [`DiagnosticError::Unavailable`], which pages turn into a placeholder line
//! instead of an error response.

use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticError {
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    /// argv of the queue-status command, e.g. `["squeue"]`; empty disables it
    pub queue_command: Vec<String>,
    /// argv of the device-status command, e.g. `["nvidia-smi"]`; empty disables it
    pub device_command: Vec<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct HostDiagnostics {
    config: DiagnosticsConfig,
}

impl HostDiagnostics {
    pub fn new(config: DiagnosticsConfig) -> Self {
        Self { config }
    }

    pub async fn queue_snapshot(&self) -> Result<String, DiagnosticError> {
        run_diagnostic(&self.config.queue_command, self.config.timeout).await
    }

    pub async fn device_snapshot(&self) -> Result<String, DiagnosticError> {
        run_diagnostic(&self.config.device_command, self.config.timeout).await
    }

    /// Queue snapshot, or a placeholder naming the command that failed.
    pub async fn queue_text(&self) -> String {
        describe(&self.config.queue_command, self.queue_snapshot().await)
    }

    /// Device snapshot, or a placeholder naming the command that failed.
    pub async fn device_text(&self) -> String {
        describe(&self.config.device_command, self.device_snapshot().await)
    }
}

fn describe(argv: &[String], outcome: Result<String, DiagnosticError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(err) => {
            let label = argv
                .first()
                .map(|p| {
                    std::path::Path::new(p)
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| p.clone())
                })
                .unwrap_or_else(|| "diagnostic".to_string());
            format!("Failed to retrieve {} output: {}", label, err)
        },
    }
}

async fn run_diagnostic(argv: &[String], timeout: Duration) -> Result<String, DiagnosticError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| DiagnosticError::Unavailable("command not configured".to_string()))?;

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, output).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            log::debug!("Diagnostic command {} failed to start: {}", program, e);
            return Err(DiagnosticError::Unavailable(format!("cannot run {}: {}", program, e)));
        },
        Err(_) => {
            log::warn!("Diagnostic command {} timed out after {:?}", program, timeout);
            return Err(DiagnosticError::Unavailable(format!(
                "{} timed out after {}s",
                program,
                timeout.as_secs()
            )));
        },
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiagnosticError::Unavailable(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn diagnostics(queue: &[&str], device: &[&str], timeout_ms: u64) -> HostDiagnostics {
        HostDiagnostics::new(DiagnosticsConfig {
            queue_command: queue.iter().map(|s| s.to_string()).collect(),
            device_command: device.iter().map(|s| s.to_string()).collect(),
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    #[tokio::test]
    async fn test_output_passes_through_verbatim() {
        let diag = diagnostics(&["printf", "JOBID PARTITION\n  42 gpu\n"], &["echo", "GPU 0"], 5_000);
        assert_eq!(diag.queue_snapshot().await.unwrap(), "JOBID PARTITION\n  42 gpu\n");
        assert_eq!(diag.device_text().await, "GPU 0\n");
    }

    #[tokio::test]
    async fn test_failures_degrade_to_placeholder() {
        let diag = diagnostics(&["/nonexistent/squeue"], &["sh", "-c", "echo boom >&2; exit 3"], 5_000);

        assert!(matches!(diag.queue_snapshot().await, Err(DiagnosticError::Unavailable(_))));
        assert!(diag.queue_text().await.starts_with("Failed to retrieve squeue output: "));

        let device = diag.device_text().await;
        assert!(device.starts_with("Failed to retrieve sh output: "), "{}", device);
        assert!(device.contains("boom"));
    }

    #[tokio::test]
    async fn test_timeout_and_disabled_command() {
        let diag = diagnostics(&["sleep", "5"], &[], 100);

        let queue = diag.queue_text().await;
        assert!(queue.contains("timed out"), "{}", queue);
        assert_eq!(
            diag.device_text().await,
            "Failed to retrieve diagnostic output: command not configured"
        );
    }
}
