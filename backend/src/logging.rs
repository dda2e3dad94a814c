//! Log setup for the server binary.
//!
//! The afold crates log through the `log` facade. `tracing_log::LogTracer`
//! forwards those records, along with actix's access log, into the
//! subscriber installed here: an optional console layer and an always-on
//! file layer next to the job store.

use crate::config::LoggingSettings;
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Line format of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Connection churn from the HTTP stack drowns out job events at `info`.
const QUIET_TARGETS: &[&str] = &["actix_server", "actix_http", "mio"];

fn env_filter(settings: &LoggingSettings) -> anyhow::Result<EnvFilter> {
    let directives: Vec<String> = std::iter::once(settings.level.clone())
        .chain(QUIET_TARGETS.iter().map(|target| format!("{}=warn", target)))
        .chain(settings.targets.iter().map(|(target, lvl)| format!("{}={}", target, lvl)))
        .collect();
    let filter = directives.join(",");
    EnvFilter::try_new(&filter).map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", filter, e))
}

/// Installs the global subscriber. Call once, before the server starts.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(&settings.file_path).parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.file_path)?;

    tracing_log::LogTracer::init().ok();

    let console_layer = if settings.log_to_console {
        Some(tracing_subscriber::fmt::layer().with_filter(env_filter(settings)?))
    } else {
        None
    };

    let file_layer = match LogFormat::parse(&settings.format) {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(log_file)
            .with_filter(env_filter(settings)?)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(log_file)
            .with_filter(env_filter(settings)?)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!(file = %settings.file_path, level = %settings.level, "Logging initialized");
    Ok(())
}
