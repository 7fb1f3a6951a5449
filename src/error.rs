#![warn(clippy::all, clippy::pedantic)]

use std::fmt;
use std::io;

use crate::config::loader::ConfigError;

pub type EngineResult<T> = Result<T, EngineError>;

// Structural failures only. Blocked moves and other gameplay no-ops are
// reported through `systems::ActionOutcome` instead.
#[derive(Debug)]
pub enum EngineError {
    MemoryFailure,
    Empty,
    OutOfRange { x: i32, y: i32 },
    LockFailure(&'static str),
    SyncFailure(io::Error),
    Config(ConfigError),
    Render(String),
}

impl EngineError {
    /// Errors the caller is expected to handle locally and keep going.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Empty | EngineError::OutOfRange { .. })
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MemoryFailure => write!(f, "memory allocation failed"),
            EngineError::Empty => write!(f, "queue is empty"),
            EngineError::OutOfRange { x, y } => write!(f, "cell ({x}, {y}) is outside the grid"),
            EngineError::LockFailure(name) => write!(f, "{name} lock was poisoned"),
            EngineError::SyncFailure(err) => write!(f, "failed to start thread: {err}"),
            EngineError::Config(err) => write!(f, "configuration error: {err}"),
            EngineError::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::SyncFailure(err) => Some(err),
            EngineError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

impl From<std::collections::TryReserveError> for EngineError {
    fn from(_: std::collections::TryReserveError) -> Self {
        EngineError::MemoryFailure
    }
}
