//! Bootstrap builder
//!
//! [`Turn`] owns the [`Directions`] of one application start. It is
//! configured fluently, then either built explicitly with [`Turn::build`] or
//! driven through one of the run entry points.
//!
//! ## Build sequence
//!
//! ```text
//! Turn::new()            → empty ServiceCollection stored in directions
//! with_services(..)      → caller registrations
//! build()
//!   ├─ ConfigurationProvider::add_configuration   (once, if present)
//!   ├─ LoggingProvider::add_logging               (once, if present)
//!   └─ ServiceCollection → dill Catalog           (every call)
//! ```
//!
//! Calling [`Turn::build`] again rebuilds the provider from the current
//! collection. Providers already applied are not applied a second time, and
//! catalogs obtained earlier keep their original registrations.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let code = Turn::new()
//!     .with_args(std::env::args())
//!     .with_unhandled_error_code(|e| {
//!         eprintln!("{e}");
//!         2
//!     })
//!     .run::<dyn Greeter, EnglishGreeter, _>(|greeter| {
//!         println!("{}", greeter.greet());
//!         Ok(0)
//!     })?;
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use dill::Component;
use tracing::{debug, info, warn};

use crate::configuration::Configuration;
use crate::constants::OPAQUE_PANIC_MESSAGE;
use crate::directions::{Args, Direction, Directions};
use crate::error::{Result, TurnError};
use crate::extensions::{ConfigurationProvider, LoggingProvider};
use crate::handler::UnhandledErrorHandler;
use crate::services::{ServiceCollection, ServiceProvider, resolve_service};

/// Bootstrap builder for a console-style application
pub struct Turn {
    directions: Directions,
    publish_directions: bool,
    configuration_applied: bool,
    logging_applied: bool,
}

impl Turn {
    /// Create a turn holding an empty service collection
    pub fn new() -> Self {
        let mut directions = Directions::new();
        directions.add(ServiceCollection::new());
        Self {
            directions,
            publish_directions: false,
            configuration_applied: false,
            logging_applied: false,
        }
    }

    pub fn directions(&self) -> &Directions {
        &self.directions
    }

    pub fn directions_mut(&mut self) -> &mut Directions {
        &mut self.directions
    }

    /// Service collection of this turn
    pub fn services_mut(&mut self) -> &mut ServiceCollection {
        self.directions.service_collection_mut()
    }

    /// Configuration placed in the directions by a configuration provider
    pub fn configuration(&self) -> Result<&Configuration> {
        self.directions
            .try_get::<Configuration>()
            .ok_or(TurnError::ConfigurationRequired)
    }

    // ========================================================================
    // Fluent configuration
    // ========================================================================

    /// Apply arbitrary changes to the turn
    pub fn with_turn<F>(mut self, with: F) -> Self
    where
        F: FnOnce(&mut Turn),
    {
        with(&mut self);
        self
    }

    /// Apply registrations to the service collection
    pub fn with_services<F>(mut self, services: F) -> Self
    where
        F: FnOnce(&mut ServiceCollection),
    {
        services(self.services_mut());
        self
    }

    /// Publish the arguments and configuration as singleton services
    ///
    /// The values are read from the directions each time the provider is
    /// built.
    pub fn with_directions(mut self) -> Self {
        self.publish_directions = true;
        self
    }

    /// Store a collaborator in the directions
    pub fn add_direction<D: Direction>(mut self, direction: D) -> Self {
        self.directions.add(direction);
        self
    }

    /// Store the command line arguments verbatim
    pub fn with_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_direction(Args::new(args))
    }

    pub fn with_configuration<P>(self, provider: P) -> Self
    where
        P: ConfigurationProvider + 'static,
    {
        self.add_direction::<Box<dyn ConfigurationProvider>>(Box::new(provider))
    }

    pub fn with_logging<P>(self, provider: P) -> Self
    where
        P: LoggingProvider + 'static,
    {
        self.add_direction::<Box<dyn LoggingProvider>>(Box::new(provider))
    }

    /// Handle escaping errors with access to the turn, returning the exit code
    pub fn with_unhandled_error_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&TurnError, &Turn) -> i32 + 'static,
    {
        self.add_direction(UnhandledErrorHandler::new(handler))
    }

    /// Map escaping errors to an exit code
    pub fn with_unhandled_error_code<F>(self, handler: F) -> Self
    where
        F: Fn(&TurnError) -> i32 + 'static,
    {
        self.add_direction(UnhandledErrorHandler::from_code(handler))
    }

    /// Observe escaping errors; the exit code is 0
    pub fn with_unhandled_error_callback<F>(self, handler: F) -> Self
    where
        F: Fn(&TurnError) + 'static,
    {
        self.add_direction(UnhandledErrorHandler::from_callback(handler))
    }

    /// Observe escaping errors with access to the turn; the exit code is 0
    pub fn with_unhandled_error_turn_callback<F>(self, handler: F) -> Self
    where
        F: Fn(&TurnError, &Turn) + 'static,
    {
        self.add_direction(UnhandledErrorHandler::from_turn_callback(handler))
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Apply pending providers and build the service provider
    pub fn build(&mut self) -> Result<&ServiceProvider> {
        if self.directions.has::<ServiceProvider>() {
            debug!("Rebuilding service provider from current registrations");
        }

        self.apply_configuration()?;
        self.apply_logging()?;

        let mut services = self.directions.service_collection()?.clone();
        if self.publish_directions {
            if let Some(args) = self.directions.try_get::<Args>() {
                services.add_singleton(args.clone());
            }
            if let Some(configuration) = self.directions.try_get::<Configuration>() {
                services.add_singleton(configuration.clone());
            }
        }

        let provider = services.build_service_provider();
        info!(services = services.len(), "Built service provider");
        Ok(&*self.directions.add(provider))
    }

    fn apply_configuration(&mut self) -> Result<()> {
        if self.configuration_applied {
            return Ok(());
        }
        let Some(provider) = self.directions.remove::<Box<dyn ConfigurationProvider>>() else {
            return Ok(());
        };

        debug!(provider = provider.name(), "Applying configuration provider");
        let outcome = provider.add_configuration(self);
        self.directions.add(provider);
        outcome?;
        self.configuration_applied = true;
        Ok(())
    }

    fn apply_logging(&mut self) -> Result<()> {
        if self.logging_applied {
            return Ok(());
        }
        let Some(provider) = self.directions.remove::<Box<dyn LoggingProvider>>() else {
            return Ok(());
        };

        debug!(provider = provider.name(), "Applying logging provider");
        let outcome = provider.add_logging(self);
        self.directions.add(provider);
        outcome?;
        self.logging_applied = true;
        Ok(())
    }

    // ========================================================================
    // Run
    // ========================================================================

    /// Register `C` for `I`, build, resolve `I` and pass it to `run`
    pub fn run<I, C, F>(&mut self, run: F) -> Result<i32>
    where
        I: ?Sized + Send + Sync + 'static,
        C: Component + Send + Sync + 'static,
        F: FnOnce(Arc<I>) -> anyhow::Result<i32>,
    {
        self.services_mut().add_transient::<I, C>();
        self.guarded(
            |turn| {
                let service = resolve_service::<I>(turn.build()?)?;
                run(service).map_err(TurnError::execution)
            },
            |code| code,
        )
    }

    /// Action-shaped [`Turn::run`]; a handled error yields `Ok(())`
    pub fn run_action<I, C, F>(&mut self, run: F) -> Result<()>
    where
        I: ?Sized + Send + Sync + 'static,
        C: Component + Send + Sync + 'static,
        F: FnOnce(Arc<I>) -> anyhow::Result<()>,
    {
        self.services_mut().add_transient::<I, C>();
        self.guarded(
            |turn| {
                let service = resolve_service::<I>(turn.build()?)?;
                run(service).map_err(TurnError::execution)
            },
            |_| (),
        )
    }

    /// Build and pass the service provider to `run`
    pub fn run_with_provider<F>(&mut self, run: F) -> Result<i32>
    where
        F: FnOnce(&ServiceProvider) -> anyhow::Result<i32>,
    {
        self.guarded(
            |turn| run(turn.build()?).map_err(TurnError::execution),
            |code| code,
        )
    }

    /// Action-shaped [`Turn::run_with_provider`]
    pub fn run_action_with_provider<F>(&mut self, run: F) -> Result<()>
    where
        F: FnOnce(&ServiceProvider) -> anyhow::Result<()>,
    {
        self.guarded(
            |turn| run(turn.build()?).map_err(TurnError::execution),
            |_| (),
        )
    }

    /// Failure boundary shared by the run entry points
    ///
    /// Errors and panics raised by `body` go to the registered handler, whose
    /// code is turned into a value by `handled`. Without a handler errors are
    /// returned as-is and panics resume unwinding with their original payload.
    fn guarded<T, B, H>(&mut self, body: B, handled: H) -> Result<T>
    where
        B: FnOnce(&mut Turn) -> Result<T>,
        H: FnOnce(i32) -> T,
    {
        let error = match panic::catch_unwind(AssertUnwindSafe(|| body(&mut *self))) {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(error)) => error,
            Err(payload) => {
                if !self.directions.has::<UnhandledErrorHandler>() {
                    panic::resume_unwind(payload);
                }
                TurnError::panicked(panic_message(&*payload))
            }
        };

        let Some(handler) = self.directions.try_get::<UnhandledErrorHandler>() else {
            return Err(error);
        };
        warn!(error = %error, "Unhandled error passed to handler");
        let code = handler.handle(&error, self);
        debug!(code, "Unhandled error handler returned");
        Ok(handled(code))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        OPAQUE_PANIC_MESSAGE.to_string()
    }
}

impl Default for Turn {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turn")
            .field("directions", &self.directions)
            .field("publish_directions", &self.publish_directions)
            .field("configuration_applied", &self.configuration_applied)
            .field("logging_applied", &self.logging_applied)
            .finish()
    }
}

// ============================================================================
// One-shot entry points
// ============================================================================

/// Run `run` against a fresh turn with `C` registered for `I`
pub fn run<I, C, F>(run: F) -> Result<i32>
where
    I: ?Sized + Send + Sync + 'static,
    C: Component + Send + Sync + 'static,
    F: FnOnce(Arc<I>) -> anyhow::Result<i32>,
{
    Turn::new().run::<I, C, F>(run)
}

/// Action-shaped [`run`]
pub fn run_action<I, C, F>(run: F) -> Result<()>
where
    I: ?Sized + Send + Sync + 'static,
    C: Component + Send + Sync + 'static,
    F: FnOnce(Arc<I>) -> anyhow::Result<()>,
{
    Turn::new().run_action::<I, C, F>(run)
}

/// [`run`] with extra registrations
pub fn run_with_services<I, C, S, F>(services: S, run: F) -> Result<i32>
where
    I: ?Sized + Send + Sync + 'static,
    C: Component + Send + Sync + 'static,
    S: FnOnce(&mut ServiceCollection),
    F: FnOnce(Arc<I>) -> anyhow::Result<i32>,
{
    Turn::new().with_services(services).run::<I, C, F>(run)
}

/// [`run_with_services`] with the arguments stored and published as a service
pub fn run_with_args<I, C, A, S, F>(args: A, services: S, run: F) -> Result<i32>
where
    I: ?Sized + Send + Sync + 'static,
    C: Component + Send + Sync + 'static,
    A: IntoIterator,
    A::Item: Into<String>,
    S: FnOnce(&mut ServiceCollection),
    F: FnOnce(Arc<I>) -> anyhow::Result<i32>,
{
    Turn::new()
        .with_directions()
        .with_args(args)
        .with_services(services)
        .run::<I, C, F>(run)
}

/// Register `C` for `I` on a fresh turn and resolve one instance
pub fn resolve<I, C>() -> Result<Arc<I>>
where
    I: ?Sized + Send + Sync + 'static,
    C: Component + Send + Sync + 'static,
{
    let mut turn = Turn::new().with_services(|services| {
        services.add_transient::<I, C>();
    });
    resolve_service::<I>(turn.build()?)
}
