//! Unhandled error handler
//!
//! A single-slot fallback invoked by the run boundary when the bootstrap or
//! the run callback fails. Its return value becomes the exit code.

use std::fmt;

use crate::constants::HANDLED_EXIT_CODE;
use crate::error::TurnError;
use crate::turn::Turn;

type HandlerFn = dyn Fn(&TurnError, &Turn) -> i32;

/// Fallback handler for errors escaping a run callback
pub struct UnhandledErrorHandler {
    handler: Box<HandlerFn>,
}

impl UnhandledErrorHandler {
    /// Handler receiving the error and the turn, returning an exit code
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&TurnError, &Turn) -> i32 + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    /// Handler mapping the error to an exit code
    pub fn from_code<F>(handler: F) -> Self
    where
        F: Fn(&TurnError) -> i32 + 'static,
    {
        Self::new(move |error, _| handler(error))
    }

    /// Handler observing the error; the exit code is always 0
    pub fn from_callback<F>(handler: F) -> Self
    where
        F: Fn(&TurnError) + 'static,
    {
        Self::new(move |error, _| {
            handler(error);
            HANDLED_EXIT_CODE
        })
    }

    /// Handler observing the error and the turn; the exit code is always 0
    pub fn from_turn_callback<F>(handler: F) -> Self
    where
        F: Fn(&TurnError, &Turn) + 'static,
    {
        Self::new(move |error, turn| {
            handler(error, turn);
            HANDLED_EXIT_CODE
        })
    }

    /// Invoke the handler
    pub fn handle(&self, error: &TurnError, turn: &Turn) -> i32 {
        (self.handler)(error, turn)
    }
}

impl fmt::Debug for UnhandledErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnhandledErrorHandler").finish_non_exhaustive()
    }
}
