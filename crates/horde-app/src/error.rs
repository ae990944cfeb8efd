//! Host-side errors.

use thiserror::Error;

use horde_core::error::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    /// The game loop thread has exited.
    #[error("game loop is gone")]
    Disconnected,

    #[error("shared state lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
