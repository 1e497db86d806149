//! Wave lifecycle: spawn, clear detection, recovery and intermission.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use bastion_core::components::{Enemy, Health, Objective, Steering, Unit};
use bastion_core::config::{DifficultyScaling, SimParams};
use bastion_core::constants::*;
use bastion_core::events::SimEvent;

use bastion_enemy_ai::profiles::{roll_archetype, scaled_hp, spawn_stats};

use crate::orders::{AreaAttack, CombatTarget};
use crate::systems::economy::Economy;
use crate::world_setup::{self, SpawnSequence};

/// Wave progress, carried across frames.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Current wave number, starting at 1.
    pub wave: u32,
    /// Seconds left in the intermission, while one is running.
    pub intermission: Option<f64>,
}

impl WaveState {
    pub fn in_intermission(&self) -> bool {
        self.intermission.is_some()
    }
}

/// Enemies spawned for `wave`, never fewer than one.
pub fn spawn_count(wave: u32, count_scale: f64) -> u32 {
    let base = (WAVE_BASE_COUNT + WAVE_COUNT_PER_WAVE * wave) as f64;
    ((base * count_scale).round() as u32).max(1)
}

/// Scrap paid out for clearing `wave`.
pub fn clear_reward(wave: u32, reward_scale: f64) -> u32 {
    let base = (WAVE_REWARD_BASE + WAVE_REWARD_PER_WAVE * wave) as f64;
    (base * reward_scale).round() as u32
}

/// Spawn the enemies for `wave` along the map edges. Returns how many.
pub fn spawn_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut SpawnSequence,
    params: &SimParams,
    scaling: DifficultyScaling,
    wave: u32,
) -> u32 {
    let count = spawn_count(wave, scaling.count_scale);
    for _ in 0..count {
        let position = world_setup::random_edge_position(rng, params);
        let archetype = roll_archetype(rng.gen_range(0..100));
        let hp = scaled_hp(archetype, wave, scaling.stat_scale);
        world_setup::spawn_enemy(world, seq, position, spawn_stats(archetype, wave), hp);
    }
    count
}

/// Living enemies in the world.
pub fn enemies_remaining(world: &World) -> u32 {
    world
        .query::<(&Enemy, &Health)>()
        .iter()
        .filter(|(_, (_, health))| health.alive)
        .count() as u32
}

/// Run the wave director for one frame.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut SpawnSequence,
    state: &mut WaveState,
    economy: &mut Economy,
    events: &mut Vec<SimEvent>,
    params: &SimParams,
    scaling: DifficultyScaling,
    dt: f64,
) {
    if !state.in_intermission() && enemies_remaining(world) == 0 {
        clear_wave(world, rng, seq, state, economy, events, params, scaling);
    }

    if let Some(remaining) = state.intermission.as_mut() {
        *remaining -= dt;
        if *remaining <= 0.0 {
            start_next_wave(world, rng, seq, state, events, params, scaling);
        }
    }
}

/// End the intermission and spawn the next wave.
pub fn start_next_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut SpawnSequence,
    state: &mut WaveState,
    events: &mut Vec<SimEvent>,
    params: &SimParams,
    scaling: DifficultyScaling,
) {
    state.intermission = None;
    state.wave += 1;
    let enemy_count = spawn_wave(world, rng, seq, params, scaling, state.wave);
    info!(wave = state.wave, enemy_count, "wave started");
    events.push(SimEvent::WaveStarted {
        wave: state.wave,
        enemy_count,
    });
}

#[allow(clippy::too_many_arguments)]
fn clear_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut SpawnSequence,
    state: &mut WaveState,
    economy: &mut Economy,
    events: &mut Vec<SimEvent>,
    params: &SimParams,
    scaling: DifficultyScaling,
) {
    let corpses: Vec<Entity> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in corpses {
        let _ = world.despawn(entity);
    }

    for (_entity, (_unit, health)) in world.query_mut::<(&Unit, &mut Health)>() {
        restore(health, params.wave_clear_unit_heal);
    }
    for (_entity, (_objective, health)) in world.query_mut::<(&Objective, &mut Health)>() {
        restore(health, params.wave_clear_objective_heal);
    }

    let reward = clear_reward(state.wave, scaling.reward_scale);
    economy.earn(reward);

    world_setup::spawn_node_field(
        world,
        rng,
        seq,
        params,
        params.replenish_node_count,
        params.replenish_node_scrap,
    );

    for (_entity, (_unit, target, area, steering)) in
        world.query_mut::<(&Unit, &mut CombatTarget, &mut AreaAttack, &mut Steering)>()
    {
        target.0 = None;
        area.0 = None;
        if !steering.manual {
            steering.moving = false;
        }
    }

    state.intermission = Some(params.intermission_secs);
    info!(wave = state.wave, reward, scrap = economy.scrap, "wave cleared");
    events.push(SimEvent::WaveCleared {
        wave: state.wave,
        reward,
    });
}

/// Heal by a whole-point fraction of max hp, clamped to max.
fn restore(health: &mut Health, fraction: f64) {
    let amount = (health.max_hp as f64 * fraction) as i32;
    health.hp = (health.hp + amount).clamp(0, health.max_hp);
}
