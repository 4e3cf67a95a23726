//! Merged application configuration
//!
//! [`Configuration`] is the value a configuration provider places in the
//! directions. It wraps a [`Figment`] so sections can be extracted into any
//! `serde` type on demand.

use figment::Figment;
use serde::de::DeserializeOwned;

use crate::error::{Result, TurnError};

/// Immutable merged configuration
#[derive(Debug, Clone)]
pub struct Configuration {
    figment: Figment,
}

impl Configuration {
    /// Wrap an already merged figment
    pub fn new(figment: Figment) -> Self {
        Self { figment }
    }

    /// Underlying figment
    pub fn figment(&self) -> &Figment {
        &self.figment
    }

    /// Deserialize the whole configuration
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        self.figment
            .extract()
            .map_err(|e| TurnError::configuration_with_source("Failed to extract configuration", e))
    }

    /// Deserialize the section at a dotted key path
    pub fn extract_section<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.figment.extract_inner(key).map_err(|e| {
            TurnError::configuration_with_source(format!("Failed to extract section '{key}'"), e)
        })
    }

    /// Deserialize a section, falling back to `T::default()` when it is absent
    pub fn section_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if self.contains(key) {
            self.extract_section(key)
        } else {
            Ok(T::default())
        }
    }

    /// Whether a value exists at the dotted key path
    pub fn contains(&self, key: &str) -> bool {
        self.figment.find_value(key).is_ok()
    }
}

impl From<Figment> for Configuration {
    fn from(figment: Figment) -> Self {
        Self::new(figment)
    }
}
