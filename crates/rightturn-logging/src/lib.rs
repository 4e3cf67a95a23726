//! # rightturn-logging
//!
//! Logging for [`rightturn::Turn`] using the tracing ecosystem.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rightturn::Turn;
//! use rightturn_config::FigmentConfiguration;
//! use rightturn_logging::TracingLogging;
//!
//! let turn = Turn::new()
//!     .with_configuration(FigmentConfiguration::default())
//!     .with_logging(TracingLogging::from_configuration());
//! ```

pub mod config;
pub mod constants;
pub mod logging;
pub mod provider;

pub use config::LoggingConfig;
pub use logging::{init_logging, parse_log_level};
pub use provider::TracingLogging;
