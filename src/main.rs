//! Insight server entrypoint
//!
//! The heavy lifting (initialization, middleware wiring, HTTP serving)
//! lives in dedicated modules so this file remains a thin orchestrator.

mod lifecycle;
mod logging;

use anyhow::Result;
use insight_commons::ServerConfig;
use lifecycle::{bootstrap, run};
use log::info;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when the config file is missing)
    let config = if Path::new(CONFIG_PATH).exists() {
        match ServerConfig::from_file(CONFIG_PATH) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("FATAL: Failed to load {}: {}", CONFIG_PATH, e);
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("No {} found, using defaults with environment overrides", CONFIG_PATH);
        ServerConfig::from_env()?
    };

    // Logging before any other side effects
    logging::init_logging(&config.logging)?;

    info!(
        "Insight server v{} starting on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port
    );

    // Build application state and seed startup data
    let state = bootstrap(&config).await?;

    // Run the HTTP server until termination
    run(&config, state).await
}
