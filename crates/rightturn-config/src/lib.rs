//! # rightturn-config
//!
//! Figment-backed configuration for [`rightturn::Turn`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rightturn::Turn;
//! use rightturn_config::{ConfigLoader, FigmentConfiguration};
//!
//! let turn = Turn::new().with_configuration(
//!     FigmentConfiguration::new(ConfigLoader::new().with_env_prefix("DEMO"))
//!         .with_section::<GreetingSettings>("greeting"),
//! );
//! ```

pub mod constants;
pub mod loader;
pub mod provider;

pub use loader::ConfigLoader;
pub use provider::FigmentConfiguration;
