//! Rejections for player commands.
//!
//! A rejected command changes nothing. The engine logs it and carries on.

use thiserror::Error;

use bastion_core::enums::{GamePhase, UpgradeTrack};
use bastion_core::types::EntityId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("command needs a game in progress (phase is {0:?})")]
    NoGameInProgress(GamePhase),
    #[error("no unit in roster slot {0}")]
    UnknownSlot(usize),
    #[error("unit in roster slot {0} does not take orders")]
    NotSelectable(usize),
    #[error("order lists no units")]
    EmptyOrder,
    #[error("enemy {0:?} not found")]
    EnemyNotFound(EntityId),
    #[error("difficulty can only change between games")]
    DifficultyLocked,
    #[error("no intermission is running")]
    NotInIntermission,
    #[error("upgrade costs {cost} scrap, only {available} available")]
    InsufficientScrap { cost: u32, available: u32 },
    #[error("{} is already at its maximum level", .0.as_str())]
    TrackMaxed(UpgradeTrack),
}
