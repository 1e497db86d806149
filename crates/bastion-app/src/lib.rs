//! Headless Bastion driver.
//!
//! Runs the simulation engine on a paced game-loop thread, forwards player
//! commands to it over a channel and keeps the latest snapshot for polling.

pub mod error;
pub mod game_loop;
pub mod state;

pub use bastion_core as core;
pub use error::AppError;
