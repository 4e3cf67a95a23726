//! Structured logging with tracing
//!
//! Installs the global subscriber: an `EnvFilter`, a text or JSON stdout
//! layer and an optional daily rolling file layer.

use std::ffi::OsStr;
use std::path::Path;

use rightturn::{Result, TurnError};
use tracing::{Level, info};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_ENV_VAR};

/// Initialize logging with the provided configuration
///
/// Fails if the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config.file_output.as_deref().map(rolling_appender);

    // Layer types differ per format so each branch installs its own stack
    let installed = if config.json_format {
        let stdout = fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_file(true)
            .with_line_number(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(config.with_target);
            registry.with(stdout).with(file).try_init()
        } else {
            registry.with(stdout).try_init()
        }
    } else {
        let stdout = fmt::layer().with_target(config.with_target);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(config.with_target);
            registry.with(stdout).with(file).try_init()
        } else {
            registry.with(stdout).try_init()
        }
    };

    installed.map_err(|e| TurnError::logging_with_source("Failed to install subscriber", e))?;
    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(TurnError::logging(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

fn rolling_appender(path: &Path) -> RollingFileAppender {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM));
    tracing_appender::rolling::daily(directory, stem)
}
