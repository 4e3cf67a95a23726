//! Error handling types

use thiserror::Error;

use crate::constants::FAILURE_EXIT_CODE;

/// Result type alias for bootstrap operations that can fail
pub type Result<T> = std::result::Result<T, TurnError>;

/// Boxed source error carried by extension failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the bootstrap helper
#[derive(Error, Debug)]
pub enum TurnError {
    /// A configuration collaborator was needed but none was registered
    #[error(
        "Configuration is required. Register a configuration provider (rightturn-config) to supply it"
    )]
    ConfigurationRequired,

    /// Directions lookup miss
    #[error("Direction not found: {direction}")]
    DirectionNotFound {
        /// Name of the collaborator kind that was requested
        direction: &'static str,
    },

    /// The DI runtime could not produce the requested service
    #[error("Service resolution error for {service}: {message}")]
    Resolution {
        /// Type name of the requested service
        service: &'static str,
        /// Message reported by the container
        message: String,
    },

    /// Configuration loading or extraction error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Logging setup error
    #[error("Logging error: {message}")]
    Logging {
        /// Description of the logging error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Error returned by the run callback, passed through unchanged
    #[error(transparent)]
    Execution(#[from] anyhow::Error),

    /// Panic intercepted at the run boundary
    #[error("Unhandled panic: {message}")]
    Panicked {
        /// Panic payload rendered as text
        message: String,
    },
}

// Lookup error creation methods
impl TurnError {
    /// Create a direction-not-found error
    pub fn direction_not_found(direction: &'static str) -> Self {
        Self::DirectionNotFound { direction }
    }

    /// Create a service resolution error
    pub fn resolution<S: Into<String>>(service: &'static str, message: S) -> Self {
        Self::Resolution {
            service,
            message: message.into(),
        }
    }
}

// Extension error creation methods
impl TurnError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a logging error
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging {
            message: message.into(),
            source: None,
        }
    }

    /// Create a logging error with source
    pub fn logging_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Logging {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Run boundary error creation methods
impl TurnError {
    /// Wrap an error returned by a run callback
    pub fn execution(error: anyhow::Error) -> Self {
        Self::Execution(error)
    }

    /// Create a panic error from a rendered payload
    pub fn panicked<S: Into<String>>(message: S) -> Self {
        Self::Panicked {
            message: message.into(),
        }
    }
}

// Inspection methods
impl TurnError {
    /// Whether this error reports a missing configuration collaborator
    pub fn is_configuration_required(&self) -> bool {
        matches!(self, Self::ConfigurationRequired)
    }

    /// Borrow the callback error when this is an execution error
    pub fn as_execution(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Execution(error) => Some(error),
            _ => None,
        }
    }

    /// Process exit status for a caller that terminates on this error
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}
