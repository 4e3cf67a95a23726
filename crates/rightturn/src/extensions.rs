//! Extension points for configuration and logging
//!
//! Both providers receive the [`Turn`] while it is being built and may
//! mutate its service collection and directions. The configuration provider
//! always runs before the logging provider.

use crate::error::Result;
use crate::turn::Turn;

/// Augments the registrations with configuration-backed services
pub trait ConfigurationProvider {
    /// Provider name for diagnostics
    fn name(&self) -> &str {
        "configuration"
    }

    /// Load configuration and register it with the turn
    fn add_configuration(&self, turn: &mut Turn) -> Result<()>;
}

/// Augments the registrations with logging services
pub trait LoggingProvider {
    /// Provider name for diagnostics
    fn name(&self) -> &str {
        "logging"
    }

    /// Install logging and register its services with the turn
    fn add_logging(&self, turn: &mut Turn) -> Result<()>;
}

impl<F> ConfigurationProvider for F
where
    F: Fn(&mut Turn) -> Result<()>,
{
    fn add_configuration(&self, turn: &mut Turn) -> Result<()> {
        self(turn)
    }
}

impl<F> LoggingProvider for F
where
    F: Fn(&mut Turn) -> Result<()>,
{
    fn add_logging(&self, turn: &mut Turn) -> Result<()> {
        self(turn)
    }
}
