//! Driver-level failures.

use thiserror::Error;

use bastion_core::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid simulation parameters: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to start the game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("game loop is not running")]
    NotRunning,
    #[error("game loop hung up")]
    Disconnected,
    #[error("game loop thread panicked")]
    LoopPanicked,
}
