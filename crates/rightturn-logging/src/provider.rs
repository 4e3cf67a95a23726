//! Tracing logging provider
//!
//! Resolves a [`LoggingConfig`] either directly or from a configuration
//! section, installs the subscriber and registers the effective
//! configuration as a singleton service.

use rightturn::{LoggingProvider, Result, Turn, TurnError};
use tracing::{debug, warn};

use crate::config::LoggingConfig;
use crate::constants::DEFAULT_LOGGING_SECTION;
use crate::logging::{init_logging, parse_log_level};

#[derive(Debug, Clone)]
enum LoggingSource {
    Explicit(LoggingConfig),
    Section(String),
}

/// Logging provider backed by tracing-subscriber
#[derive(Debug, Clone)]
pub struct TracingLogging {
    source: LoggingSource,
    strict: bool,
}

impl TracingLogging {
    /// Use an explicit configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            source: LoggingSource::Explicit(config),
            strict: false,
        }
    }

    /// Read the `logging` section of the turn's configuration
    pub fn from_configuration() -> Self {
        Self::from_section(DEFAULT_LOGGING_SECTION)
    }

    /// Read the section at `key` of the turn's configuration
    ///
    /// A missing section falls back to [`LoggingConfig::default`]; a missing
    /// configuration fails with [`TurnError::ConfigurationRequired`].
    pub fn from_section(key: impl Into<String>) -> Self {
        Self {
            source: LoggingSource::Section(key.into()),
            strict: false,
        }
    }

    /// Fail when a global subscriber is already installed
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn resolve_config(&self, turn: &Turn) -> Result<LoggingConfig> {
        match &self.source {
            LoggingSource::Explicit(config) => Ok(config.clone()),
            LoggingSource::Section(key) => turn.configuration()?.section_or_default(key),
        }
    }
}

impl Default for TracingLogging {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}

impl LoggingProvider for TracingLogging {
    fn name(&self) -> &str {
        "tracing"
    }

    fn add_logging(&self, turn: &mut Turn) -> Result<()> {
        let config = self.resolve_config(turn)?;
        parse_log_level(&config.level)?;

        match init_logging(&config) {
            Ok(()) => {}
            Err(err @ TurnError::Logging { .. }) if !self.strict => {
                warn!(error = %err, "Keeping the already installed subscriber");
            }
            Err(err) => return Err(err),
        }

        debug!(level = %config.level, json = config.json_format, "Logging registered");
        turn.services_mut().add_singleton(config);
        Ok(())
    }
}
