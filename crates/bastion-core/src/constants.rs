//! Simulation constants and tuning parameters.
//!
//! Values that a session may want to override live in
//! [`SimParams`](crate::config::SimParams), which defaults to these.

/// Nominal frame rate the presentation layer runs at (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per nominal frame.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

/// Below this length a direction vector is treated as zero.
pub const DIRECTION_EPSILON: f64 = 1.0e-4;

/// Steering snaps to its target once closer than this.
pub const ARRIVAL_EPSILON: f64 = 0.5;

// --- World bounds ---

/// Playable map width (world units).
pub const MAP_WIDTH: f64 = 3500.0;

/// Playable map height (world units).
pub const MAP_HEIGHT: f64 = 3500.0;

// --- Squad ---

/// Number of units in the squad (one per role).
pub const SQUAD_SIZE: usize = 6;

/// Radius of the ring the squad spawns on around the objective.
pub const SQUAD_RING_RADIUS: f64 = 80.0;

/// Unit body width.
pub const UNIT_WIDTH: f64 = 45.0;

/// Unit body height.
pub const UNIT_HEIGHT: f64 = 75.0;

/// Default unit move speed.
pub const UNIT_BASE_SPEED: f64 = 200.0;

/// Buffer beyond weapon range before a unit starts closing in again.
pub const ATTACK_RANGE_HYSTERESIS: f64 = 12.0;

/// Projectile speed.
pub const PROJECTILE_SPEED: f64 = 500.0;

/// Projectiles further than this outside the map are discarded.
pub const PROJECTILE_BOUNDS_MARGIN: f64 = 50.0;

// --- Healer ---

/// A healer only follows damaged allies within this distance.
pub const MEDIC_SEARCH_RADIUS: f64 = 1000.0;

/// Fraction of the heal range a healer closes to when following an ally.
pub const MEDIC_STANDOFF_FACTOR: f64 = 0.85;

/// Multiplier on heal rate for allies overlapping the healer's body.
pub const MEDIC_CONTACT_FACTOR: f64 = 2.0;

// --- Enemies ---

/// Enemy body size (square).
pub const ENEMY_SIZE: f64 = 32.0;

/// Inset from the map edge for enemy spawn points.
pub const ENEMY_SPAWN_MARGIN: f64 = ENEMY_SIZE / 2.0 + 2.0;

/// Base detection range for units.
pub const ENEMY_DETECTION_BASE: f64 = 380.0;

/// Detection range gained per wave.
pub const ENEMY_DETECTION_PER_WAVE: f64 = 10.0;

/// Range at which enemies notice the objective.
pub const ENEMY_OBJECTIVE_DETECTION_RANGE: f64 = 12_000.0;

/// Extra distance past attack range at which the objective takes priority.
pub const OBJECTIVE_PRIORITY_BUFFER: f64 = 10.0;

/// Scrap reward band for killing an enemy (inclusive).
pub const ENEMY_SCRAP_MIN: u32 = 2;
pub const ENEMY_SCRAP_MAX: u32 = 5;

/// Particles in an enemy death burst.
pub const ENEMY_BURST_COUNT: u32 = 12;

// --- Resource nodes ---

/// Resource node body size (square).
pub const NODE_SIZE: f64 = 48.0;

/// Nodes spawn at least this far inside the map edge.
pub const NODE_SPAWN_MARGIN: f64 = 200.0;

/// Nodes spawning closer than this to the objective are pushed away.
pub const NODE_OBJECTIVE_CLEARANCE: f64 = 400.0;

/// Node hit points band (inclusive).
pub const NODE_HP_MIN: i32 = 160;
pub const NODE_HP_MAX: i32 = 260;

/// Nodes in a fresh field.
pub const INITIAL_NODE_COUNT: usize = 10;

/// Scrap yield band of the initial field.
pub const INITIAL_NODE_SCRAP: (u32, u32) = (6, 14);

/// Nodes added after each cleared wave.
pub const REPLENISH_NODE_COUNT: usize = 4;

/// Scrap yield band of replenished nodes.
pub const REPLENISH_NODE_SCRAP: (u32, u32) = (10, 20);

/// Particles in a node destruction burst.
pub const NODE_BURST_COUNT: u32 = 10;

// --- Objective ---

pub const OBJECTIVE_WIDTH: f64 = 120.0;
pub const OBJECTIVE_HEIGHT: f64 = 180.0;
pub const OBJECTIVE_MAX_HP: i32 = 200;

// --- Waves ---

/// Base enemy count before wave and difficulty scaling.
pub const WAVE_BASE_COUNT: u32 = 8;

/// Extra enemies per wave number.
pub const WAVE_COUNT_PER_WAVE: u32 = 2;

/// Base scrap reward for clearing a wave.
pub const WAVE_REWARD_BASE: u32 = 12;

/// Extra clear reward per wave number.
pub const WAVE_REWARD_PER_WAVE: u32 = 2;

/// Fraction of max hp restored to every unit on wave clear.
pub const WAVE_CLEAR_UNIT_HEAL: f64 = 0.4;

/// Fraction of max hp restored to the objective on wave clear.
pub const WAVE_CLEAR_OBJECTIVE_HEAL: f64 = 0.25;

/// Intermission length between waves (simulated seconds).
pub const INTERMISSION_SECS: f64 = 20.0;

// --- Time control ---

pub const TIME_SCALE_MIN: f64 = 0.25;
pub const TIME_SCALE_MAX: f64 = 3.0;
pub const TIME_SCALE_STEP: f64 = 0.25;

// --- Upgrades ---

pub const HULL_UPGRADE_COST: u32 = 10;
pub const HULL_UPGRADE_STEP: u32 = 8;
pub const HULL_MAX: u32 = 100;

pub const SHIELDING_UPGRADE_COST: u32 = 15;
pub const SHIELDING_UPGRADE_STEP: u32 = 5;
pub const SHIELDING_MAX: u32 = 50;

pub const ENGINES_UPGRADE_COST: u32 = 20;
pub const ENGINES_UPGRADE_STEP: u32 = 3;
pub const ENGINES_MAX: u32 = 25;

pub const LIFE_SUPPORT_UPGRADE_COST: u32 = 25;
pub const LIFE_SUPPORT_UPGRADE_STEP: u32 = 3;
pub const LIFE_SUPPORT_MAX: u32 = 25;
