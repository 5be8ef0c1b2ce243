//! Logging setup.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` (honouring
//! `RUST_LOG`, falling back to the configured level), a formatted stderr
//! layer and, when a log file is configured, a non-blocking file layer from
//! `tracing-appender`.

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::GeoError;

/// Default log level when neither `RUST_LOG` nor configuration set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `geoveil=debug`.
    pub level: String,
    /// Optional log file; written in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Keeps the file writer alive. Dropping it flushes buffered log lines.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Parse a plain level name (`trace`..`error`).
pub fn parse_level(s: &str) -> Result<Level, GeoError> {
    s.trim()
        .parse::<Level>()
        .map_err(|_| GeoError::Config(format!("unknown log level '{}'", s)))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set or the log file cannot be
/// created.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, GeoError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| GeoError::Config(format!("invalid log filter: {}", e)))?;

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, file_guard) = match &config.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path.file_name().ok_or_else(|| {
                GeoError::Config(format!("log file path has no file name: {}", path.display()))
            })?;

            std::fs::create_dir_all(&directory)?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| GeoError::Config(format!("failed to install logger: {}", e)))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
