// Logging module — powered by tracing-subscriber
//
// Uses tracing-subscriber for structured output. A compatibility bridge
// (`tracing_log::LogTracer`) captures all `log::*` macro calls and routes
// them through the tracing subscriber so every line, including those from
// dependencies, obeys the same filter and format.

use anyhow::Result;
use insight_commons::config::LoggingSettings;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Build the `EnvFilter` from the base level, hardcoded noisy-crate
/// overrides, and per-target overrides from config.
fn build_env_filter(level: &str, target_levels: &HashMap<String, String>) -> Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    // Suppress noisy third-party crates
    let noisy: &[(&str, &str)] = &[
        ("actix_server", "warn"),
        ("actix_web", "warn"),
        ("h2", "warn"),
        ("hyper", "warn"),
        ("mio", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    for (target, lvl) in target_levels {
        directives.push(format!("{}={}", target, lvl));
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_str, e))
}

/// Initialize logging based on configuration.
///
/// Sets up `tracing-subscriber` with:
///  - Colored console layer (when `log_to_console` is true)
///  - Optional file layer (compact text or JSON lines)
///  - `tracing_log::LogTracer` bridge so that all `log::*` calls are captured
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let log_format = LogFormat::from_str(&settings.format);

    // Bridge `log` crate → tracing (ok() in case already initialized)
    tracing_log::LogTracer::init().ok();

    // -- Console layer (optional) --
    let console_layer = if settings.log_to_console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_filter(build_env_filter(&settings.level, &settings.targets)?),
        )
    } else {
        None
    };

    // -- File layer (optional) --
    let file_layer = if settings.file_path.is_empty() {
        None
    } else {
        if let Some(parent) = Path::new(&settings.file_path).parent() {
            fs::create_dir_all(parent)?;
        }
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.file_path)?;

        let layer = if log_format == LogFormat::Json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(log_file)
                .with_target(true)
                .with_filter(build_env_filter(&settings.level, &settings.targets)?)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_file)
                .with_target(true)
                .with_filter(build_env_filter(&settings.level, &settings.targets)?)
                .boxed()
        };
        Some(layer)
    };

    // Compose and install as global subscriber
    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::trace!(
        "Logging initialized: level={}, console={}, file={}",
        settings.level,
        settings.log_to_console,
        settings.file_path
    );

    Ok(())
}
