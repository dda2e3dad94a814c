// Configuration module
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub worker: WorkerSettings,
    #[serde(default)]
    pub diagnostics: DiagnosticsSettings,
    #[serde(default)]
    pub submission: SubmissionSettings,
    #[serde(default)]
    pub status: StatusSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub performance: PerformanceSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// HTTP worker threads; 0 means one per CPU
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding one sub-directory per job plus the audit log
    pub base_output_dir: String,
    /// Audit log file name, relative to `base_output_dir`
    #[serde(default = "default_audit_log_file")]
    pub audit_log_file: String,
}

/// External prediction worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSettings {
    pub program: String,
    /// Passed as the second positional argument after the input file
    #[serde(default = "default_worker_policy")]
    pub policy: String,
    /// Environment variable carrying the job id into the worker
    #[serde(default = "default_job_name_env")]
    pub job_name_env: String,
}

/// Host diagnostics shown on the submission and running-job pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsSettings {
    /// argv of the queue-status command; empty disables it
    #[serde(default = "default_queue_command")]
    pub queue_command: Vec<String>,
    /// argv of the device-status command; empty disables it
    #[serde(default = "default_device_command")]
    pub device_command: Vec<String>,
    #[serde(default = "default_diagnostics_timeout")]
    pub timeout_seconds: u64,
}

/// Submission acceptance rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSettings {
    #[serde(default = "default_min_residues")]
    pub min_residues: u64,
    #[serde(default = "default_max_residues")]
    pub max_residues: u64,
    /// Only addresses in this domain may submit (e.g. "example.org")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_email_domain: Option<String>,
    /// Maximum size of the urlencoded form body in bytes
    #[serde(default = "default_max_form_bytes")]
    pub max_form_bytes: usize,
}

/// Status page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSettings {
    /// Failed-job log excerpt cap; larger logs are shown from the end
    #[serde(default = "default_failed_log_max_bytes")]
    pub failed_log_max_bytes: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Per-target level overrides, e.g. `afold_jobs = "debug"`
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

/// Performance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSettings {
    /// Seconds a client has to send request headers
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_keepalive_timeout")]
    pub keepalive_timeout: u64,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            queue_command: default_queue_command(),
            device_command: default_device_command(),
            timeout_seconds: default_diagnostics_timeout(),
        }
    }
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            min_residues: default_min_residues(),
            max_residues: default_max_residues(),
            allowed_email_domain: None,
            max_form_bytes: default_max_form_bytes(),
        }
    }
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            failed_log_max_bytes: default_failed_log_max_bytes(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file(),
            log_to_console: true,
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            keepalive_timeout: default_keepalive_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_workers() -> usize {
    0
}

fn default_true() -> bool {
    true
}

fn default_audit_log_file() -> String {
    "AF2.log".to_string()
}

fn default_worker_policy() -> String {
    "3".to_string()
}

fn default_job_name_env() -> String {
    "IBSJOBNAME".to_string()
}

fn default_queue_command() -> Vec<String> {
    vec!["squeue".to_string()]
}

fn default_device_command() -> Vec<String> {
    vec!["nvidia-smi".to_string()]
}

fn default_diagnostics_timeout() -> u64 {
    10
}

fn default_min_residues() -> u64 {
    1
}

fn default_max_residues() -> u64 {
    4000
}

fn default_max_form_bytes() -> usize {
    1024 * 1024 // 1MB
}

fn default_failed_log_max_bytes() -> u64 {
    256 * 1024 // 256KB
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "./logs/afold.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_keepalive_timeout() -> u64 {
    75
}

fn default_max_connections() -> usize {
    25000
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&content)
    }

    /// Parse, apply environment overrides, validate
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let mut config: ServerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        // Override with environment variables if present
        config.apply_env_overrides()?;

        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - AFOLD_SERVER_HOST: Override server.host
    /// - AFOLD_SERVER_PORT: Override server.port
    /// - AFOLD_BASE_DIR: Override storage.base_output_dir
    /// - AFOLD_WORKER_PROGRAM: Override worker.program
    /// - AFOLD_LOG_LEVEL: Override logging.level
    /// - AFOLD_LOG_FILE: Override logging.file_path
    /// - AFOLD_LOG_TO_CONSOLE: Override logging.log_to_console
    ///
    /// Environment variables take precedence over config.toml values
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("AFOLD_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("AFOLD_SERVER_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid AFOLD_SERVER_PORT value: {}", port_str))?;
        }

        if let Ok(path) = env::var("AFOLD_BASE_DIR") {
            self.storage.base_output_dir = path;
        }

        if let Ok(program) = env::var("AFOLD_WORKER_PROGRAM") {
            self.worker.program = program;
        }

        if let Ok(level) = env::var("AFOLD_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(path) = env::var("AFOLD_LOG_FILE") {
            self.logging.file_path = path;
        }

        if let Ok(val) = env::var("AFOLD_LOG_TO_CONSOLE") {
            let val = val.to_lowercase();
            self.logging.log_to_console = val == "true" || val == "1" || val == "yes";
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.storage.base_output_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.base_output_dir cannot be empty"));
        }

        let audit = &self.storage.audit_log_file;
        if audit.is_empty() || audit.contains('/') || audit.contains('\\') || audit == ".." {
            return Err(anyhow::anyhow!(
                "storage.audit_log_file must be a plain file name, got '{}'",
                audit
            ));
        }

        if self.worker.program.trim().is_empty() {
            return Err(anyhow::anyhow!("worker.program cannot be empty"));
        }

        if self.worker.job_name_env.is_empty() || self.worker.job_name_env.contains('=') {
            return Err(anyhow::anyhow!(
                "Invalid worker.job_name_env '{}'",
                self.worker.job_name_env
            ));
        }

        if self.diagnostics.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("diagnostics.timeout_seconds cannot be 0"));
        }

        if self.submission.min_residues > self.submission.max_residues {
            return Err(anyhow::anyhow!(
                "submission.min_residues ({}) cannot exceed submission.max_residues ({})",
                self.submission.min_residues,
                self.submission.max_residues
            ));
        }

        if let Some(domain) = &self.submission.allowed_email_domain {
            if domain.is_empty() || domain.contains('@') {
                return Err(anyhow::anyhow!(
                    "submission.allowed_email_domain must be a bare domain, got '{}'",
                    domain
                ));
            }
        }

        if self.submission.max_form_bytes == 0 {
            return Err(anyhow::anyhow!("submission.max_form_bytes cannot be 0"));
        }

        Ok(())
    }

    /// Get default configuration (useful for testing)
    pub fn default() -> Self {
        ServerConfig {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8082,
                workers: 0,
            },
            storage: StorageSettings {
                base_output_dir: "./data/jobs".to_string(),
                audit_log_file: default_audit_log_file(),
            },
            worker: WorkerSettings {
                program: "./bin/run_prediction".to_string(),
                policy: default_worker_policy(),
                job_name_env: default_job_name_env(),
            },
            diagnostics: DiagnosticsSettings::default(),
            submission: SubmissionSettings::default(),
            status: StatusSettings::default(),
            logging: LoggingSettings::default(),
            performance: PerformanceSettings::default(),
        }
    }
}
