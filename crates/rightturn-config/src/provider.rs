//! Figment configuration provider
//!
//! Loads a [`Configuration`] through a [`ConfigLoader`] while the turn is
//! being built, stores it in the directions and registers it, together with
//! any bound sections, as singleton services.

use std::fmt;

use rightturn::{Configuration, ConfigurationProvider, Result, ServiceCollection, Turn};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::loader::ConfigLoader;

type BindFn = dyn Fn(&Configuration, &mut ServiceCollection) -> Result<()>;

struct SectionBinding {
    key: String,
    bind: Box<BindFn>,
}

/// Configuration provider backed by figment
pub struct FigmentConfiguration {
    loader: ConfigLoader,
    sections: Vec<SectionBinding>,
}

impl FigmentConfiguration {
    pub fn new(loader: ConfigLoader) -> Self {
        Self {
            loader,
            sections: Vec::new(),
        }
    }

    /// Register the section at `key` as a singleton of type `T`
    pub fn with_section<T>(mut self, key: impl Into<String>) -> Self
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let key = key.into();
        let section = key.clone();
        self.sections.push(SectionBinding {
            key,
            bind: Box::new(
                move |configuration: &Configuration, services: &mut ServiceCollection| -> Result<()> {
                    let value: T = configuration.extract_section(&section)?;
                    services.add_singleton(value);
                    Ok(())
                },
            ),
        });
        self
    }

    pub fn loader(&self) -> &ConfigLoader {
        &self.loader
    }
}

impl Default for FigmentConfiguration {
    fn default() -> Self {
        Self::new(ConfigLoader::new())
    }
}

impl ConfigurationProvider for FigmentConfiguration {
    fn name(&self) -> &str {
        "figment"
    }

    fn add_configuration(&self, turn: &mut Turn) -> Result<()> {
        let configuration = self.loader.load()?;

        for section in &self.sections {
            debug!(section = %section.key, "Binding configuration section");
            (section.bind)(&configuration, turn.services_mut())?;
        }

        turn.services_mut().add_singleton(configuration.clone());
        turn.directions_mut().add(configuration);

        info!(sections = self.sections.len(), "Configuration registered");
        Ok(())
    }
}

impl fmt::Debug for FigmentConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigmentConfiguration")
            .field("loader", &self.loader)
            .field(
                "sections",
                &self.sections.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
