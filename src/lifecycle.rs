//! Server lifecycle management helpers.
//!
//! Encapsulates bootstrapping the application state and wiring the HTTP
//! server so `main.rs` stays a thin orchestrator. All dependencies are
//! constructed here, once, and passed down explicitly.

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use insight_api::middleware::{RequestId, RequestLogging};
use insight_api::{routes, AppState};
use insight_commons::ServerConfig;
use log::info;

/// Construct every service singleton and seed startup data.
pub async fn bootstrap(config: &ServerConfig) -> Result<AppState> {
    let state = AppState::from_config(config.clone())
        .context("Failed to build application state from configuration")?;

    state
        .seed()
        .await
        .context("Failed to seed startup users")?;

    Ok(state)
}

/// Run the HTTP server until termination.
///
/// Middleware order matters: the request-id layer is outermost so the
/// correlation context is installed before (and released after) everything
/// else, including completion logging.
pub async fn run(config: &ServerConfig, state: AppState) -> Result<()> {
    let bind_addr = (config.server.host.clone(), config.server.port);
    let workers = config.server.workers;

    info!("Listening on {}:{}", config.server.host, config.server.port);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(RequestLogging::new(state.logger.clone()))
            .wrap(RequestId::new())
            .configure(routes::configure)
    })
    .bind(bind_addr)
    .context("Failed to bind HTTP listener")?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await.context("HTTP server terminated abnormally")
}
