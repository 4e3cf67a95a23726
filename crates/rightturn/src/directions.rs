//! Directions - typed bag of bootstrap collaborators
//!
//! Holds at most one value per collaborator kind. The supported kinds are a
//! closed set, each backed by its own slot:
//!
//! | Kind | Stored by |
//! |------|-----------|
//! | [`ServiceCollection`] | [`Turn::new`](crate::Turn::new) |
//! | [`ServiceProvider`] | [`Turn::build`](crate::Turn::build) |
//! | [`Args`] | [`Turn::with_args`](crate::Turn::with_args) |
//! | [`Configuration`] | configuration providers |
//! | `Box<dyn ConfigurationProvider>` | [`Turn::with_configuration`](crate::Turn::with_configuration) |
//! | `Box<dyn LoggingProvider>` | [`Turn::with_logging`](crate::Turn::with_logging) |
//! | [`UnhandledErrorHandler`] | `Turn::with_unhandled_error_*` |
//!
//! Writing a kind that is already present replaces the previous value.

use std::fmt;
use std::sync::Arc;

use crate::configuration::Configuration;
use crate::error::{Result, TurnError};
use crate::extensions::{ConfigurationProvider, LoggingProvider};
use crate::handler::UnhandledErrorHandler;
use crate::services::{ServiceCollection, ServiceProvider};

mod private {
    pub trait Sealed {}
}

/// A collaborator kind with a slot in [`Directions`]
pub trait Direction: private::Sealed + Sized + 'static {
    /// Human readable kind name used in lookup errors
    const NAME: &'static str;

    #[doc(hidden)]
    fn slot(directions: &Directions) -> &Option<Self>;

    #[doc(hidden)]
    fn slot_mut(directions: &mut Directions) -> &mut Option<Self>;
}

macro_rules! direction_slot {
    ($kind:ty, $field:ident, $name:literal) => {
        impl private::Sealed for $kind {}

        impl Direction for $kind {
            const NAME: &'static str = $name;

            fn slot(directions: &Directions) -> &Option<Self> {
                &directions.$field
            }

            fn slot_mut(directions: &mut Directions) -> &mut Option<Self> {
                &mut directions.$field
            }
        }
    };
}

/// Command line arguments, stored verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args(Vec<String>);

impl Args {
    /// Store an argument vector as given
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    /// Capture the current process arguments
    pub fn from_env() -> Self {
        Self(std::env::args().collect())
    }

    /// Arguments as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the arguments in order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no argument was given
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the argument vector
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Typed bag of bootstrap collaborators owned by a [`Turn`](crate::Turn)
#[derive(Default)]
pub struct Directions {
    services: Option<ServiceCollection>,
    provider: Option<ServiceProvider>,
    args: Option<Args>,
    configuration: Option<Configuration>,
    configuration_provider: Option<Box<dyn ConfigurationProvider>>,
    logging_provider: Option<Box<dyn LoggingProvider>>,
    error_handler: Option<UnhandledErrorHandler>,
}

direction_slot!(ServiceCollection, services, "service collection");
direction_slot!(ServiceProvider, provider, "service provider");
direction_slot!(Args, args, "arguments");
direction_slot!(Configuration, configuration, "configuration");
direction_slot!(
    Box<dyn ConfigurationProvider>,
    configuration_provider,
    "configuration provider"
);
direction_slot!(Box<dyn LoggingProvider>, logging_provider, "logging provider");
direction_slot!(UnhandledErrorHandler, error_handler, "unhandled error handler");

impl Directions {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under its kind, replacing any previous value
    pub fn add<D: Direction>(&mut self, value: D) -> &mut D {
        D::slot_mut(self).insert(value)
    }

    /// Stored value of kind `D`
    pub fn get<D: Direction>(&self) -> Result<&D> {
        D::slot(self)
            .as_ref()
            .ok_or_else(|| TurnError::direction_not_found(D::NAME))
    }

    /// Mutable stored value of kind `D`
    pub fn get_mut<D: Direction>(&mut self) -> Result<&mut D> {
        D::slot_mut(self)
            .as_mut()
            .ok_or_else(|| TurnError::direction_not_found(D::NAME))
    }

    /// Stored value of kind `D`, `None` when absent
    pub fn try_get<D: Direction>(&self) -> Option<&D> {
        D::slot(self).as_ref()
    }

    /// Whether a value of kind `D` is stored
    pub fn has<D: Direction>(&self) -> bool {
        D::slot(self).is_some()
    }

    /// Take the value of kind `D` out of its slot
    pub fn remove<D: Direction>(&mut self) -> Option<D> {
        D::slot_mut(self).take()
    }

    /// Stored service collection
    pub fn service_collection(&self) -> Result<&ServiceCollection> {
        self.get()
    }

    /// Service collection, recreated empty if it was removed
    pub fn service_collection_mut(&mut self) -> &mut ServiceCollection {
        self.services.get_or_insert_with(ServiceCollection::new)
    }

    /// Built service provider, an error before the first build
    pub fn service_provider(&self) -> Result<&ServiceProvider> {
        self.get()
    }

    /// Resolve `I` from the built provider
    ///
    /// Returns `None` before the provider is built or when `I` is not
    /// registered.
    pub fn service<I: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<I>> {
        self.provider.as_ref()?.get_one::<I>().ok()
    }

    /// Whether `I` resolves from the built provider
    pub fn has_service<I: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.service::<I>().is_some()
    }
}

impl fmt::Debug for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directions")
            .field("services", &self.services)
            .field("provider", &self.provider.is_some())
            .field("args", &self.args)
            .field("configuration", &self.configuration.is_some())
            .field(
                "configuration_provider",
                &self.configuration_provider.as_ref().map(|p| p.name()),
            )
            .field(
                "logging_provider",
                &self.logging_provider.as_ref().map(|p| p.name()),
            )
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}
