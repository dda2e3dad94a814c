//! Server lifecycle management helpers.
//!
//! Bootstrapping the job context from configuration, wiring the HTTP
//! server, and coordinating graceful shutdown.

use crate::config::ServerConfig;
use crate::middleware;
use actix_web::{web, App, HttpServer};
use afold_api::configure_routes;
use afold_jobs::{AppContext, DiagnosticsConfig, JobsSettings, LauncherConfig, SubmissionPolicy};
use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Translate server configuration into job-subsystem settings.
pub fn jobs_settings(config: &ServerConfig) -> JobsSettings {
    JobsSettings {
        base_dir: PathBuf::from(&config.storage.base_output_dir),
        audit_log_file: config.storage.audit_log_file.clone(),
        launcher: LauncherConfig {
            program: PathBuf::from(&config.worker.program),
            policy: config.worker.policy.clone(),
            job_name_env: config.worker.job_name_env.clone(),
        },
        diagnostics: DiagnosticsConfig {
            queue_command: config.diagnostics.queue_command.clone(),
            device_command: config.diagnostics.device_command.clone(),
            timeout: Duration::from_secs(config.diagnostics.timeout_seconds),
        },
        submission: SubmissionPolicy {
            min_residues: config.submission.min_residues,
            max_residues: config.submission.max_residues,
            allowed_email_domain: config.submission.allowed_email_domain.clone(),
        },
        failed_log_max_bytes: config.status.failed_log_max_bytes,
    }
}

/// Prepare the job base directory and build the shared `AppContext`.
pub async fn bootstrap(config: &ServerConfig) -> Result<Arc<AppContext>> {
    let phase_start = std::time::Instant::now();

    let base_dir = Path::new(&config.storage.base_output_dir);
    tokio::fs::create_dir_all(base_dir).await.map_err(|e| {
        anyhow::anyhow!("Cannot create job directory {}: {}", base_dir.display(), e)
    })?;

    let worker = Path::new(&config.worker.program);
    if !worker.exists() {
        // Submissions will fail with a launch error until it appears.
        warn!("Worker program {} does not exist", worker.display());
    }

    let app_context = AppContext::new(jobs_settings(config));
    info!(
        "Job store at {} (audit log: {}, worker: {} {})",
        app_context.layout().base_dir().display(),
        app_context.audit_log().path().display(),
        config.worker.program,
        config.worker.policy
    );
    debug!(
        "AppContext initialized ({:.2}ms)",
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(app_context)
}

/// Application data and routes, shared by the server and the HTTP tests.
pub fn app_config(
    app_context: Arc<AppContext>,
    config: &ServerConfig,
) -> impl Fn(&mut web::ServiceConfig) + Clone {
    let form_limit = config.submission.max_form_bytes;
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(app_context.clone()))
            .app_data(middleware::form_config(form_limit))
            .configure(configure_routes);
    }
}

/// Run the HTTP server until it stops or Ctrl+C is received.
///
/// Workers started by the server live in their own process groups and keep
/// running after shutdown.
pub async fn run(config: &ServerConfig, app_context: Arc<AppContext>) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };

    let configure = app_config(app_context.clone(), config);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .configure(configure.clone())
    })
    .workers(workers)
    .max_connections(config.performance.max_connections)
    .keep_alive(Duration::from_secs(config.performance.keepalive_timeout))
    .client_request_timeout(Duration::from_secs(config.performance.request_timeout))
    .bind(&bind_addr)?
    .run();

    info!("Listening on http://{} ({} workers)", bind_addr, workers);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Err(e)) => log::error!("Server stopped with error: {}", e),
                Err(e) => log::error!("Server task failed: {}", e),
                Ok(Ok(())) => {},
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
            debug!("Server uptime was {}s", app_context.uptime_seconds());
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
