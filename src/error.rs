//! Error types for restwatch.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Faults that are not part of normal workout flow.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (config file, log file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config could not be encoded or decoded.
    #[error("Config encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Durations are never negative; formatting one is a caller bug.
    #[error("Cannot format negative duration: {0}s")]
    NegativeDuration(i64),
}

/// A command that is not valid in the current workout phase.
///
/// These are advisories, not faults: the command is a no-op and the
/// display text is shown to the user as a warning.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("Please start workout first!")]
    NotStarted,

    #[error("Workout is paused!")]
    Paused,

    #[error("Workout already in progress")]
    AlreadyStarted,
}
