//! Archetype-specific behavioral profiles.
//!
//! Consolidates per-archetype parameters and the wave spawn table.

use bastion_core::components::EnemyStats;
use bastion_core::constants::*;
use bastion_core::enums::EnemyArchetype;

/// Behavioral profile for an enemy archetype.
pub struct EnemyBehaviorProfile {
    pub speed: f64,
    pub attack_range: f64,
    pub damage: i32,
    /// Seconds between attacks.
    pub attack_cooldown: f64,
    pub hp_base: i32,
    pub hp_per_wave: i32,
    /// Always goes for the objective, ignoring units.
    pub prioritize_objective: bool,
    /// Distance kept from the nearest unit. Zero disables avoidance.
    pub avoid_radius: f64,
}

/// Cumulative spawn weights out of 100, checked in order.
const SPAWN_TABLE: [(u32, EnemyArchetype); 4] = [
    (50, EnemyArchetype::Grunt),
    (78, EnemyArchetype::Fast),
    (92, EnemyArchetype::Tank),
    (98, EnemyArchetype::Shooter),
];

/// Get the behavioral profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> EnemyBehaviorProfile {
    match archetype {
        EnemyArchetype::Grunt => EnemyBehaviorProfile {
            speed: 110.0,
            attack_range: 65.0,
            damage: 10,
            attack_cooldown: 1.8,
            hp_base: 70,
            hp_per_wave: 4,
            prioritize_objective: false,
            avoid_radius: 0.0,
        },
        EnemyArchetype::Fast => EnemyBehaviorProfile {
            speed: 180.0,
            attack_range: 45.0,
            damage: 7,
            attack_cooldown: 1.4,
            hp_base: 50,
            hp_per_wave: 3,
            prioritize_objective: false,
            avoid_radius: 0.0,
        },
        EnemyArchetype::Tank => EnemyBehaviorProfile {
            speed: 75.0,
            attack_range: 80.0,
            damage: 18,
            attack_cooldown: 2.4,
            hp_base: 160,
            hp_per_wave: 10,
            prioritize_objective: false,
            avoid_radius: 0.0,
        },
        EnemyArchetype::Shooter => EnemyBehaviorProfile {
            speed: 100.0,
            attack_range: 260.0,
            damage: 8,
            attack_cooldown: 1.9,
            hp_base: 60,
            hp_per_wave: 5,
            prioritize_objective: false,
            avoid_radius: 0.0,
        },
        EnemyArchetype::Siege => EnemyBehaviorProfile {
            speed: 65.0,
            attack_range: 380.0,
            damage: 10,
            attack_cooldown: 3.0,
            hp_base: 55,
            hp_per_wave: 5,
            prioritize_objective: true,
            avoid_radius: 200.0,
        },
    }
}

/// Map a uniform roll in `0..100` onto an archetype.
pub fn roll_archetype(roll: u32) -> EnemyArchetype {
    SPAWN_TABLE
        .iter()
        .find(|(threshold, _)| roll < *threshold)
        .map(|(_, archetype)| *archetype)
        .unwrap_or(EnemyArchetype::Siege)
}

/// Hit points for an archetype at a given wave, truncated toward zero.
pub fn scaled_hp(archetype: EnemyArchetype, wave: u32, stat_scale: f64) -> i32 {
    let profile = get_profile(archetype);
    let base = profile.hp_base + wave as i32 * profile.hp_per_wave;
    (base as f64 * stat_scale) as i32
}

/// Unit detection range at a given wave.
pub fn detection_range(wave: u32) -> f64 {
    ENEMY_DETECTION_BASE + wave as f64 * ENEMY_DETECTION_PER_WAVE
}

/// Full stat block for a freshly spawned enemy.
pub fn spawn_stats(archetype: EnemyArchetype, wave: u32) -> EnemyStats {
    let profile = get_profile(archetype);
    EnemyStats {
        archetype,
        speed: profile.speed,
        detection_range: detection_range(wave),
        attack_range: profile.attack_range,
        damage: profile.damage,
        attack_cooldown: profile.attack_cooldown,
        objective_detection_range: ENEMY_OBJECTIVE_DETECTION_RANGE,
        prioritize_objective: profile.prioritize_objective,
        avoid_radius: profile.avoid_radius,
    }
}
