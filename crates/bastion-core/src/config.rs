//! Tunable simulation parameters.
//!
//! Passed explicitly into every system so tests can inject their own values.
//! Every field falls back to the matching constant when omitted from a file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::Difficulty;

pub const BUILTIN_SIM_PARAMS: &str = include_str!("data/sim_params.json");

/// Per-difficulty multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScaling {
    /// Multiplier on enemies spawned per wave.
    pub count_scale: f64,
    /// Multiplier on enemy hit points.
    pub stat_scale: f64,
    /// Multiplier on the wave-clear scrap reward.
    pub reward_scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub casual: DifficultyScaling,
    pub normal: DifficultyScaling,
    pub hard: DifficultyScaling,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            casual: DifficultyScaling {
                count_scale: 0.75,
                stat_scale: 0.85,
                reward_scale: 1.15,
            },
            normal: DifficultyScaling {
                count_scale: 1.0,
                stat_scale: 1.0,
                reward_scale: 1.0,
            },
            hard: DifficultyScaling {
                count_scale: 1.35,
                stat_scale: 1.25,
                reward_scale: 0.85,
            },
        }
    }
}

impl DifficultyTable {
    pub fn scaling(&self, difficulty: Difficulty) -> DifficultyScaling {
        match difficulty {
            Difficulty::Casual => self.casual,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Inclusive scrap yield band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapBand {
    pub min: u32,
    pub max: u32,
}

impl From<(u32, u32)> for ScrapBand {
    fn from((min, max): (u32, u32)) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub map_width: f64,
    pub map_height: f64,
    pub range_hysteresis: f64,
    pub projectile_speed: f64,
    pub projectile_bounds_margin: f64,
    pub intermission_secs: f64,
    pub time_scale_min: f64,
    pub time_scale_max: f64,
    pub time_scale_step: f64,
    pub objective_priority_buffer: f64,
    pub medic_search_radius: f64,
    pub wave_clear_unit_heal: f64,
    pub wave_clear_objective_heal: f64,
    pub initial_node_count: usize,
    pub replenish_node_count: usize,
    pub node_hp_min: i32,
    pub node_hp_max: i32,
    pub initial_node_scrap: ScrapBand,
    pub replenish_node_scrap: ScrapBand,
    pub enemy_kill_scrap: ScrapBand,
    pub enemy_burst_count: u32,
    pub node_burst_count: u32,
    pub difficulty: DifficultyTable,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            range_hysteresis: ATTACK_RANGE_HYSTERESIS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_bounds_margin: PROJECTILE_BOUNDS_MARGIN,
            intermission_secs: INTERMISSION_SECS,
            time_scale_min: TIME_SCALE_MIN,
            time_scale_max: TIME_SCALE_MAX,
            time_scale_step: TIME_SCALE_STEP,
            objective_priority_buffer: OBJECTIVE_PRIORITY_BUFFER,
            medic_search_radius: MEDIC_SEARCH_RADIUS,
            wave_clear_unit_heal: WAVE_CLEAR_UNIT_HEAL,
            wave_clear_objective_heal: WAVE_CLEAR_OBJECTIVE_HEAL,
            initial_node_count: INITIAL_NODE_COUNT,
            replenish_node_count: REPLENISH_NODE_COUNT,
            node_hp_min: NODE_HP_MIN,
            node_hp_max: NODE_HP_MAX,
            initial_node_scrap: INITIAL_NODE_SCRAP.into(),
            replenish_node_scrap: REPLENISH_NODE_SCRAP.into(),
            enemy_kill_scrap: (ENEMY_SCRAP_MIN, ENEMY_SCRAP_MAX).into(),
            enemy_burst_count: ENEMY_BURST_COUNT,
            node_burst_count: NODE_BURST_COUNT,
            difficulty: DifficultyTable::default(),
        }
    }
}

impl SimParams {
    /// Parameters compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_SIM_PARAMS).expect("builtin sim params should parse")
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: SimParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width <= 0.0 || self.map_height <= 0.0 {
            return Err(ConfigError::invalid("map", "dimensions must be positive"));
        }
        if self.projectile_speed <= 0.0 {
            return Err(ConfigError::invalid("projectile_speed", "must be positive"));
        }
        if self.range_hysteresis < 0.0 {
            return Err(ConfigError::invalid("range_hysteresis", "must not be negative"));
        }
        if self.time_scale_step <= 0.0 {
            return Err(ConfigError::invalid("time_scale_step", "must be positive"));
        }
        if self.time_scale_min <= 0.0 || self.time_scale_min > self.time_scale_max {
            return Err(ConfigError::invalid(
                "time_scale_min",
                "must be positive and not above time_scale_max",
            ));
        }
        if self.node_hp_min <= 0 || self.node_hp_min > self.node_hp_max {
            return Err(ConfigError::invalid(
                "node_hp_min",
                "must be positive and not above node_hp_max",
            ));
        }
        for (field, band) in [
            ("initial_node_scrap", self.initial_node_scrap),
            ("replenish_node_scrap", self.replenish_node_scrap),
            ("enemy_kill_scrap", self.enemy_kill_scrap),
        ] {
            if band.min > band.max {
                return Err(ConfigError::invalid(field, "min exceeds max"));
            }
        }
        Ok(())
    }

    pub fn scaling(&self, difficulty: Difficulty) -> DifficultyScaling {
        self.difficulty.scaling(difficulty)
    }

    /// Snap a requested time scale onto the step grid and clamp it to the band.
    pub fn quantize_time_scale(&self, requested: f64) -> f64 {
        let steps = (requested / self.time_scale_step).round();
        (steps * self.time_scale_step).clamp(self.time_scale_min, self.time_scale_max)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse sim params: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read sim params from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid sim param `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}
