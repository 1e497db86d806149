//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Position, Rect};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Selection ---
    /// Change the selection using roster slots.
    SelectUnits {
        slots: Vec<usize>,
        #[serde(default)]
        mode: SelectionMode,
    },
    /// Select every selectable unit.
    SelectAll,

    // --- Orders ---
    /// Move the listed units, keeping their formation around `target`.
    MoveOrder { units: Vec<usize>, target: Position },
    /// Commit the listed units to one enemy regardless of range.
    AttackOrder { units: Vec<usize>, target: EntityId },
    /// Capture every enemy inside `rect` and spread the listed units over them.
    AreaOrder { units: Vec<usize>, rect: Rect },

    // --- Simulation control ---
    /// Toggle between running and paused.
    TogglePause,
    /// Change the time scale by a number of steps (negative slows down).
    AdjustTimeScale { steps: i32 },
    /// Back to real time, unpaused.
    ResetTimeScale,
    /// End the intermission now and start the next wave.
    AdvanceWave,
    /// Difficulty for the next new game. Rejected while a game is running.
    SetDifficulty { difficulty: Difficulty },
    /// Full reset into a fresh session.
    StartNewGame,

    // --- Economy ---
    PurchaseUpgrade { track: UpgradeTrack },
}
