//! # rightturn
//!
//! Bootstrap helper for console-style applications built on the dill IoC
//! container.
//!
//! A [`Turn`] collects service registrations, lets optional configuration
//! and logging providers augment them, builds a dill [`Catalog`](dill::Catalog)
//! and runs a single callback against it. Errors escaping the callback are
//! routed to an optional [`UnhandledErrorHandler`].
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`directions`] | Typed bag of bootstrap collaborators |
//! | [`services`] | Ordered service registrations and catalog building |
//! | [`turn`] | Bootstrap builder and run boundary |
//! | [`extensions`] | Configuration and logging extension points |
//! | [`configuration`] | Merged configuration value |
//! | [`handler`] | Unhandled error handler |
//! | [`error`] | Error type |
//!
//! ## Example
//!
//! ```ignore
//! use dill::{component, interface};
//!
//! trait Greeter: Send + Sync {
//!     fn greeting(&self) -> String;
//! }
//!
//! #[component]
//! #[interface(dyn Greeter)]
//! struct EnglishGreeter;
//!
//! impl Greeter for EnglishGreeter {
//!     fn greeting(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! let length = rightturn::run::<dyn Greeter, EnglishGreeter, _>(|greeter| {
//!     Ok(greeter.greeting().len() as i32)
//! })?;
//! assert_eq!(length, 5);
//! ```

pub mod configuration;
pub mod constants;
pub mod directions;
pub mod error;
pub mod extensions;
pub mod handler;
pub mod services;
pub mod turn;

pub use configuration::Configuration;
pub use directions::{Args, Direction, Directions};
pub use error::{Result, TurnError};
pub use extensions::{ConfigurationProvider, LoggingProvider};
pub use handler::UnhandledErrorHandler;
pub use services::{Lifetime, ServiceCollection, ServiceDescriptor, ServiceProvider, resolve_service};
pub use turn::{Turn, resolve, run, run_action, run_with_args, run_with_services};
