//! Game state snapshot: the complete visible state handed to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::components::UpgradeLevels;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, Position, Rect, SimTime, Velocity};

/// Complete read-only game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub units: Vec<UnitView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub resource_nodes: Vec<ResourceNodeView>,
    pub objective: ObjectiveView,
    pub hud: HudView,
    /// Events raised during this tick only.
    pub events: Vec<SimEvent>,
}

/// A squad unit, in roster slot order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub slot: usize,
    pub role: UnitRole,
    pub position: Position,
    /// Integer top-left corner for sprite placement.
    pub display_x: i32,
    pub display_y: i32,
    pub width: f64,
    pub height: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub range: f64,
    pub selected: bool,
    pub moving: bool,
    pub move_target: Option<Position>,
    pub target: Option<EntityId>,
    pub mining: Option<EntityId>,
    /// Rectangle of the area order this unit is working through.
    pub area_rect: Option<Rect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub archetype: EnemyArchetype,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub show_health_bar: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    /// Unit that fired it.
    pub owner: EntityId,
    pub position: Position,
    pub velocity: Velocity,
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNodeView {
    pub id: EntityId,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub show_health_bar: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub upgrades: UpgradeLevels,
    pub complete: bool,
}

/// One row of the upgrade shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeTrackView {
    pub track: UpgradeTrack,
    pub level: u32,
    pub max: u32,
    pub cost: u32,
    /// Enough scrap and not yet maxed.
    pub purchasable: bool,
}

/// Aggregate numbers for the heads-up display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub wave: u32,
    pub enemies_remaining: u32,
    pub scrap: u32,
    /// Seconds left in the intermission, if one is running.
    pub intermission_remaining: Option<f64>,
    pub difficulty: Difficulty,
    pub difficulty_label: String,
    pub time_scale: f64,
    pub paused: bool,
    pub upgrades: Vec<UpgradeTrackView>,
    pub objective_complete: bool,
}
