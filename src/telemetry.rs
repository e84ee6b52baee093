//! Tracing setup: stderr layer plus optional rolling file layer.

use std::fs;
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{FileLoggingConfig, LogFormat, LoggingConfig};
use crate::paths;

const LOG_FILE_PREFIX: &str = "flowtrack.log";

/// Keeps the non-blocking file writer alive. Hold until process exit.
pub struct TelemetryGuard {
    _guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

/// Install the global subscriber.
///
/// `verbosity` maps to the default level (0 = error, 1 = info, 2+ = debug);
/// the `FT_LOG` env var or the config filter override it.
pub fn init(verbosity: u8, logging: &LoggingConfig) -> TelemetryGuard {
    let mut filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .with_env_var("FT_LOG")
        .from_env_lossy();
    if let Some(directives) = &logging.filter
        && let Ok(parsed) = directives.parse()
    {
        filter = filter.add_directive(parsed);
    }

    let mut guards = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if logging.stderr {
        layers.push(stderr_layer(logging.stderr_format));
    }

    if logging.file.enabled {
        let dir = resolve_log_dir(&logging.file);
        match fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                guards.push(guard);
                layers.push(file_layer(logging.file.format, writer));
            }
            Err(e) => {
                eprintln!("log dir init failed for {}: {e}", dir.display());
            }
        }
    }

    layers.push(Box::new(filter));
    Registry::default().with(layers).init();

    TelemetryGuard { _guards: guards }
}

fn stderr_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Pretty => Box::new(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr),
        ),
        LogFormat::Compact => Box::new(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false),
        ),
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        ),
    }
}

fn file_layer(
    format: LogFormat,
    writer: tracing_appender::non_blocking::NonBlocking,
) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Pretty => Box::new(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_ansi(false)
                .with_writer(writer),
        ),
        LogFormat::Compact => Box::new(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(writer),
        ),
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer),
        ),
    }
}

fn level_from_verbosity(verbosity: u8) -> tracing::metadata::LevelFilter {
    match verbosity {
        0 => tracing::metadata::LevelFilter::ERROR,
        1 => tracing::metadata::LevelFilter::INFO,
        _ => tracing::metadata::LevelFilter::DEBUG,
    }
}

fn resolve_log_dir(config: &FileLoggingConfig) -> PathBuf {
    config.dir.clone().unwrap_or_else(paths::log_dir)
}
