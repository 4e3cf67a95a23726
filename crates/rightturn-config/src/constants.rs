//! Configuration constants

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "appsettings.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "app";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "APP";

/// Separator between prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";
