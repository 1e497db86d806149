//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Components that refer to
//! other entities live in the simulation crate, next to the ECS.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Creation sequence number. Nearest-target searches break distance ties
/// in favor of the lower value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// Axis-aligned body extent, centered on the entity position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodySize {
    pub width: f64,
    pub height: f64,
}

/// Hit points. `hp` always stays within `0..=max_hp`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
    /// False once the entity has been killed. Squad units never die.
    pub alive: bool,
    /// Set on first damage; drives the health bar display.
    pub damaged: bool,
}

/// Squad membership of a player unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SquadMember {
    /// Roster slot (0-based), the address used by player commands.
    pub slot: usize,
    pub role: UnitRole,
    pub selected: bool,
}

/// Combat and movement stats of a player unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitStats {
    pub speed: f64,
    /// Shots per second.
    pub fire_rate: f64,
    /// Weapon range, also the standoff distance when engaging.
    pub range: f64,
    pub damage: i32,
    /// Hit points restored per second (healers only, zero otherwise).
    pub heal_rate: f64,
}

/// Movement intent toward a point.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Steering {
    pub moving: bool,
    pub target: Position,
    /// The current move was ordered by the player and suppresses auto-mining.
    pub manual: bool,
}

/// Per-unit timers that persist across frames.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UnitTimers {
    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f64,
    /// Fractional hit points received from healing, not yet applied.
    pub heal_fraction: f64,
}

/// Stats of a hostile entity, fixed at spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyStats {
    pub archetype: EnemyArchetype,
    pub speed: f64,
    pub detection_range: f64,
    pub attack_range: f64,
    pub damage: i32,
    /// Seconds between attacks.
    pub attack_cooldown: f64,
    pub objective_detection_range: f64,
    pub prioritize_objective: bool,
    /// Keep at least this far from the nearest unit. Zero disables avoidance.
    pub avoid_radius: f64,
}

/// Time since an enemy last attacked.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackClock {
    pub since_last_attack: f64,
}

/// Scrap granted when a resource node is destroyed (inclusive band).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceYield {
    pub scrap_min: u32,
    pub scrap_max: u32,
}

/// Upgrade levels of the objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub hull_integrity: u32,
    pub shielding: u32,
    pub engines: u32,
    pub life_support: u32,
}

/// Marks an entity as a squad unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit;

/// Marks an entity as a hostile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks an entity as a minable resource node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceNode;

/// Marks an entity as the defended objective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Objective;
