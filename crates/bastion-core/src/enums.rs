//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Squad member archetype. Roster slot order follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitRole {
    Rifle,
    Shotgun,
    Sniper,
    Heavy,
    Rocket,
    /// Support unit: heals allies, never fires, never mines, never selectable.
    Healer,
}

impl UnitRole {
    /// Full roster in slot order.
    pub const ROSTER: [UnitRole; 6] = [
        UnitRole::Rifle,
        UnitRole::Shotgun,
        UnitRole::Sniper,
        UnitRole::Heavy,
        UnitRole::Rocket,
        UnitRole::Healer,
    ];

    pub fn is_healer(&self) -> bool {
        matches!(self, UnitRole::Healer)
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitRole::Rifle => "RIFLE",
            UnitRole::Shotgun => "SHOTGUN",
            UnitRole::Sniper => "SNIPER",
            UnitRole::Heavy => "HEAVY",
            UnitRole::Rocket => "ROCKET",
            UnitRole::Healer => "MEDIC",
        }
    }
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Baseline melee attacker.
    Grunt,
    /// Quick, fragile melee attacker.
    Fast,
    /// Slow, heavily armored melee attacker.
    Tank,
    /// Medium-range attacker.
    Shooter,
    /// Long-range artillery that always targets the objective and keeps away from units.
    Siege,
}

/// Session difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Casual,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Casual => "Casual",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casual" => Some(Self::Casual),
            "normal" => Some(Self::Normal),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// Objective upgrade track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeTrack {
    HullIntegrity,
    Shielding,
    Engines,
    LifeSupport,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 4] = [
        UpgradeTrack::HullIntegrity,
        UpgradeTrack::Shielding,
        UpgradeTrack::Engines,
        UpgradeTrack::LifeSupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeTrack::HullIntegrity => "hull_integrity",
            UpgradeTrack::Shielding => "shielding",
            UpgradeTrack::Engines => "engines",
            UpgradeTrack::LifeSupport => "life_support",
        }
    }
}

/// How a selection command combines with the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Clear the selection, then select the listed units.
    #[default]
    Replace,
    /// Add the listed units to the selection.
    Add,
    /// Flip the selection state of each listed unit.
    Toggle,
}

/// Color family of a death-effect burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstPalette {
    /// Red splatter from a killed enemy.
    Alien,
    /// Brown debris from a destroyed resource node.
    Rock,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Objective destroyed. Terminal.
    Defeat,
    /// All objective upgrade tracks maxed. Terminal.
    Victory,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Defeat | GamePhase::Victory)
    }

    /// A game is running, paused or not.
    pub fn in_session(&self) -> bool {
        matches!(self, GamePhase::Active | GamePhase::Paused)
    }
}
