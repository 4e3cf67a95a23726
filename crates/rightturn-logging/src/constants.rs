//! Logging constants

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured filter
pub const LOG_ENV_VAR: &str = "RIGHTTURN_LOG";

/// Configuration section read by [`TracingLogging::from_configuration`](crate::TracingLogging::from_configuration)
pub const DEFAULT_LOGGING_SECTION: &str = "logging";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "app";
