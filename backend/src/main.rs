// afold server entrypoint
//!
//! Initialization and HTTP wiring live in dedicated modules so this file
//! remains a thin orchestrator.

use afold_server::config::ServerConfig;
use afold_server::lifecycle::{bootstrap, run};
use afold_server::logging;
use anyhow::Result;
use log::info;
use std::env;

#[actix_web::main]
async fn main() -> Result<()> {
    // Optional first argument: path to the configuration file
    let config_path = env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());

    let config = match ServerConfig::from_file(&config_path) {
        Ok(cfg) => {
            eprintln!(
                "✅ Loaded config from: {}",
                std::fs::canonicalize(&config_path)
                    .unwrap_or_else(|_| std::path::PathBuf::from(&config_path))
                    .display()
            );
            cfg
        },
        Err(e) => {
            eprintln!("❌ FATAL: Failed to load {}: {}", config_path, e);
            eprintln!("❌ Server cannot start without valid configuration");
            std::process::exit(1);
        },
    };

    // Logging before any other side effects
    logging::init_logging(&config.logging)?;

    let version = env!("CARGO_PKG_VERSION");
    let commit = env!("GIT_COMMIT_HASH");
    let build_date = env!("BUILD_DATE");
    let branch = env!("GIT_BRANCH");

    info!("╔═══════════════════════════════════════════════════════════════╗");
    info!("║           afold server v{:<39} ║", version);
    info!("╠═══════════════════════════════════════════════════════════════╣");
    info!("║  Commit:     {:<49} ║", commit);
    info!("║  Branch:     {:<49} ║", branch);
    info!("║  Built:      {:<49} ║", build_date);
    info!("╚═══════════════════════════════════════════════════════════════╝");
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let app_context = bootstrap(&config).await?;

    // Run HTTP server until termination signal is received
    run(&config, app_context).await
}
