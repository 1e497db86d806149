//! Application state shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use bastion_core::commands::PlayerCommand;
use bastion_core::state::GameStateSnapshot;

use crate::error::AppError;

/// Messages sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// The sender sits behind a `Mutex` because `mpsc::Sender` is not `Sync`.
/// The snapshot is shared with the game loop thread, which replaces it
/// after every frame.
pub struct AppState {
    /// `None` until the game loop has been spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) {
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = Some(tx);
        }
    }

    pub fn send(&self, command: PlayerCommand) -> Result<(), AppError> {
        self.post(GameLoopCommand::Player(command))
    }

    /// Ask the loop to stop. Stopping a loop that already exited is fine.
    pub fn shutdown(&self) {
        let _ = self.post(GameLoopCommand::Shutdown);
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = None;
        }
    }

    /// Clone of the most recent snapshot, if a frame has run yet.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|snap| snap.clone())
    }

    fn post(&self, message: GameLoopCommand) -> Result<(), AppError> {
        let slot = self.command_tx.lock().map_err(|_| AppError::NotRunning)?;
        let tx = slot.as_ref().ok_or(AppError::NotRunning)?;
        tx.send(message).map_err(|_| AppError::Disconnected)
    }
}
