//! Configuration loader
//!
//! Handles loading configuration from serialized defaults, inline TOML,
//! a TOML file and environment variables.
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. Defaults registered with [`ConfigLoader::with_defaults`]
//! 2. Inline TOML registered with [`ConfigLoader::with_toml_str`]
//! 3. TOML configuration file (explicit path, or the first default location found)
//! 4. Environment variables with prefix (e.g., `APP__LOGGING__LEVEL`)

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::Dict;
use rightturn::{Configuration, Result, TurnError};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,

    /// Directory name used by the default search locations
    app_dir: String,

    /// Whether to look for a configuration file when no path is set
    search_default_paths: bool,

    /// Defaults and inline sources merged before the file
    base: Figment,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
            app_dir: DEFAULT_CONFIG_DIR.to_string(),
            search_default_paths: true,
            base: Figment::new(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Set the directory name used when searching default locations
    pub fn with_app_dir<S: Into<String>>(mut self, app_dir: S) -> Self {
        self.app_dir = app_dir.into();
        self
    }

    /// Skip the default file search when no explicit path is set
    pub fn without_default_paths(mut self) -> Self {
        self.search_default_paths = false;
        self
    }

    /// Merge serialized defaults
    pub fn with_defaults<T: Serialize>(mut self, defaults: T) -> Self {
        self.base = self.base.merge(Serialized::defaults(defaults));
        self
    }

    /// Merge an inline TOML document
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.base = self.base.merge(Toml::string(toml));
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<Configuration> {
        let mut figment = self.base.clone();

        if let Some(config_path) = self.resolve_config_path() {
            if config_path.exists() {
                figment = figment.merge(Toml::file(&config_path));
                info!("Configuration loaded from {}", config_path.display());
            } else {
                warn!("Configuration file not found: {}", config_path.display());
            }
        }

        // Uses a double underscore as separator for nested keys (e.g., APP__LOGGING__LEVEL)
        let prefix = format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR);
        figment = figment.merge(Env::prefixed(&prefix).split(CONFIG_ENV_SEPARATOR));

        // Surface parse errors now rather than on first extraction
        figment
            .extract::<Dict>()
            .map_err(|e| TurnError::configuration_with_source("Failed to load configuration", e))?;

        debug!(env_prefix = %prefix, "Configuration merged");
        Ok(Configuration::new(figment))
    }

    /// Reload configuration from the same sources
    pub fn reload(&self) -> Result<Configuration> {
        self.load()
    }

    /// Save a configuration value to a TOML file
    pub fn save_to_file<T: Serialize, P: AsRef<Path>>(&self, config: &T, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(config).map_err(|e| {
            TurnError::configuration_with_source("Failed to serialize config to TOML", e)
        })?;

        std::fs::write(path.as_ref(), toml_string)
            .map_err(|e| TurnError::configuration_with_source("Failed to write config file", e))?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Get the environment variable prefix
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    fn resolve_config_path(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => Some(path.clone()),
            None if self.search_default_paths => self.find_default_config_path(),
            None => None,
        }
    }

    /// Find the first existing default configuration file
    fn find_default_config_path(&self) -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir.join(&self.app_dir).join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(&self.app_dir).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|d| {
                    d.join(format!(".{}", self.app_dir))
                        .join(DEFAULT_CONFIG_FILENAME)
                })
                .unwrap_or_default(),
        ];

        candidates
            .into_iter()
            .find(|path| !path.as_os_str().is_empty() && path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
