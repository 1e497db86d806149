//! Events emitted by the simulation for effects and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Discrete things that happened during one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Spawn a radial particle burst. Playback is up to the frontend.
    DeathBurst {
        position: Position,
        palette: BurstPalette,
        count: u32,
    },
    WaveStarted { wave: u32, enemy_count: u32 },
    WaveCleared { wave: u32, reward: u32 },
    UpgradePurchased {
        track: UpgradeTrack,
        level: u32,
        cost: u32,
    },
    ObjectiveDestroyed { wave: u32 },
    ObjectiveCompleted { wave: u32 },
}
