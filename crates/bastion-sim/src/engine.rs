//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order, and produces `GameStateSnapshot`s.
//! Completely headless, so every session can be replayed from a seed.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use bastion_core::commands::PlayerCommand;
use bastion_core::components::{
    BodySize, Enemy, Health, Objective, SpawnOrder, SquadMember, Steering, Unit, UpgradeLevels,
};
use bastion_core::config::SimParams;
use bastion_core::constants::FRAME_DT;
use bastion_core::enums::{Difficulty, GamePhase, SelectionMode, UpgradeTrack};
use bastion_core::events::SimEvent;
use bastion_core::state::GameStateSnapshot;
use bastion_core::types::{EntityId, Position, Rect, SimTime};

use crate::errors::CommandError;
use crate::orders::{AreaAttack, AreaOrder, CombatTarget};
use crate::systems;
use crate::systems::economy::{self, Economy};
use crate::systems::mining::MiningState;
use crate::systems::query::living_sites;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::targeting;
use crate::systems::wave_director::{self, WaveState};
use crate::world_setup::{self, SpawnSequence};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and same commands = same session.
    pub seed: u64,
    pub difficulty: Difficulty,
    /// Initial time scale (1.0 = real time).
    pub time_scale: f64,
    pub params: SimParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::default(),
            time_scale: 1.0,
            params: SimParams::builtin(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    /// Difficulty of the running session.
    difficulty: Difficulty,
    /// Difficulty the next `StartNewGame` will use.
    next_difficulty: Difficulty,
    time_scale: f64,
    rng: ChaCha8Rng,
    seq: SpawnSequence,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    wave: WaveState,
    economy: Economy,
    mining: MiningState,
    next_squad_id: u32,
    params: SimParams,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The engine
    /// starts at the main menu; send `StartNewGame` to begin.
    pub fn new(config: SimConfig) -> Self {
        let time_scale = config.params.quantize_time_scale(config.time_scale);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            difficulty: config.difficulty,
            next_difficulty: config.difficulty,
            time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seq: SpawnSequence::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            wave: WaveState::default(),
            economy: Economy::default(),
            mining: MiningState::default(),
            next_squad_id: 0,
            params: config.params,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one rendered frame of `frame_secs` wall-clock
    /// seconds and return the resulting snapshot.
    ///
    /// Simulated time is `frame_secs * time_scale`, and zero unless the game
    /// is `Active`.
    pub fn tick(&mut self, frame_secs: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = frame_secs * self.time_scale;
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// One frame at the nominal frame rate.
    pub fn step(&mut self) -> GameStateSnapshot {
        self.tick(FRAME_DT)
    }

    /// Current state without advancing. Carries no events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn wave(&self) -> u32 {
        self.wave.wave
    }

    pub fn scrap(&self) -> u32 {
        self.economy.scrap
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// An empty running session for scenario tests: no objective, no squad,
    /// wave 1 in progress.
    #[cfg(test)]
    pub(crate) fn sandbox(params: SimParams) -> Self {
        let mut engine = Self::new(SimConfig {
            params,
            ..SimConfig::default()
        });
        engine.phase = GamePhase::Active;
        engine.wave.wave = 1;
        engine
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn spawner(&mut self) -> (&mut World, &mut SpawnSequence) {
        (&mut self.world, &mut self.seq)
    }

    #[cfg(test)]
    pub(crate) fn grant_scrap(&mut self, amount: u32) {
        self.economy.earn(amount);
    }

    /// Process all queued commands. Rejected commands change nothing.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            match self.apply_command(&command) {
                Ok(()) => debug!(?command, "command applied"),
                Err(err) => debug!(?command, %err, "command rejected"),
            }
        }
    }

    /// Apply a single player command immediately.
    pub fn apply_command(&mut self, command: &PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::StartNewGame => {
                self.start_new_game();
                return Ok(());
            }
            PlayerCommand::SetDifficulty { difficulty } => {
                if self.phase.in_session() {
                    return Err(CommandError::DifficultyLocked);
                }
                self.next_difficulty = *difficulty;
                return Ok(());
            }
            _ => {}
        }

        if !self.phase.in_session() {
            return Err(CommandError::NoGameInProgress(self.phase));
        }

        match command {
            PlayerCommand::SelectUnits { slots, mode } => self.select_units(slots, *mode),
            PlayerCommand::SelectAll => {
                for (_entity, member) in self.world.query_mut::<&mut SquadMember>() {
                    member.selected = !member.role.is_healer();
                }
                Ok(())
            }
            PlayerCommand::MoveOrder { units, target } => self.move_order(units, *target),
            PlayerCommand::AttackOrder { units, target } => self.attack_order(units, *target),
            PlayerCommand::AreaOrder { units, rect } => self.area_order(units, *rect),
            PlayerCommand::TogglePause => {
                self.phase = match self.phase {
                    GamePhase::Active => GamePhase::Paused,
                    _ => GamePhase::Active,
                };
                Ok(())
            }
            PlayerCommand::AdjustTimeScale { steps } => {
                let requested = self.time_scale + *steps as f64 * self.params.time_scale_step;
                self.time_scale = self.params.quantize_time_scale(requested);
                Ok(())
            }
            PlayerCommand::ResetTimeScale => {
                self.time_scale = self.params.quantize_time_scale(1.0);
                self.phase = GamePhase::Active;
                Ok(())
            }
            PlayerCommand::AdvanceWave => {
                if !self.wave.in_intermission() {
                    return Err(CommandError::NotInIntermission);
                }
                let scaling = self.params.scaling(self.difficulty);
                wave_director::start_next_wave(
                    &mut self.world,
                    &mut self.rng,
                    &mut self.seq,
                    &mut self.wave,
                    &mut self.events,
                    &self.params,
                    scaling,
                );
                Ok(())
            }
            PlayerCommand::PurchaseUpgrade { track } => self.purchase_upgrade(*track),
            PlayerCommand::StartNewGame | PlayerCommand::SetDifficulty { .. } => Ok(()),
        }
    }

    /// Full reset into a fresh session at wave 1.
    fn start_new_game(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.seq = SpawnSequence::default();
        self.despawn_buffer.clear();
        self.events.clear();
        self.wave = WaveState::default();
        self.economy = Economy::default();
        self.mining = MiningState::default();
        self.next_squad_id = 0;
        self.difficulty = self.next_difficulty;

        world_setup::setup_session(&mut self.world, &mut self.rng, &mut self.seq, &self.params);
        self.phase = GamePhase::Active;
        info!(difficulty = self.difficulty.label(), "new game");

        let scaling = self.params.scaling(self.difficulty);
        wave_director::start_next_wave(
            &mut self.world,
            &mut self.rng,
            &mut self.seq,
            &mut self.wave,
            &mut self.events,
            &self.params,
            scaling,
        );
    }

    fn select_units(&mut self, slots: &[usize], mode: SelectionMode) -> Result<(), CommandError> {
        let units = self.order_units(slots)?;
        if units.is_empty() {
            if let Some(&slot) = slots.first() {
                return Err(CommandError::NotSelectable(slot));
            }
        }
        for (entity, member) in self.world.query_mut::<&mut SquadMember>() {
            let listed = units.iter().any(|(unit, _)| *unit == entity);
            member.selected = match mode {
                SelectionMode::Replace => listed,
                SelectionMode::Add => member.selected || listed,
                SelectionMode::Toggle => member.selected != listed,
            };
        }
        Ok(())
    }

    /// Resolve roster slots to units that take orders, in slot order.
    /// Healer slots are skipped; an unknown slot rejects the whole list.
    fn order_units(&self, slots: &[usize]) -> Result<Vec<(Entity, Position)>, CommandError> {
        let squad: Vec<(Entity, usize, bool, Position)> = self
            .world
            .query::<(&Unit, &SquadMember, &Position)>()
            .iter()
            .map(|(entity, (_, member, pos))| (entity, member.slot, member.role.is_healer(), *pos))
            .collect();

        let mut wanted = slots.to_vec();
        wanted.sort_unstable();
        wanted.dedup();

        let mut units = Vec::with_capacity(wanted.len());
        for slot in wanted {
            let Some(&(entity, _, healer, pos)) = squad.iter().find(|(_, s, _, _)| *s == slot)
            else {
                return Err(CommandError::UnknownSlot(slot));
            };
            if !healer {
                units.push((entity, pos));
            }
        }
        Ok(units)
    }

    /// Per-unit destinations around `anchor` that keep the group's shape.
    fn formation(units: &[(Entity, Position)], anchor: Position) -> Vec<(Entity, Position)> {
        let count = units.len().max(1) as f64;
        let (sx, sy) = units
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (_, pos)| (sx + pos.x, sy + pos.y));
        let centroid = Position::new(sx / count, sy / count);
        units
            .iter()
            .map(|(entity, pos)| {
                let offset = pos.as_dvec2() - centroid.as_dvec2();
                (*entity, Position::from_dvec2(anchor.as_dvec2() + offset))
            })
            .collect()
    }

    fn move_order(&mut self, slots: &[usize], target: Position) -> Result<(), CommandError> {
        let units = self.order_units(slots)?;
        if units.is_empty() {
            return Err(CommandError::EmptyOrder);
        }
        for (entity, destination) in Self::formation(&units, target) {
            if let Ok((steering, combat, area)) = self
                .world
                .query_one_mut::<(&mut Steering, &mut CombatTarget, &mut AreaAttack)>(entity)
            {
                *steering = Steering {
                    moving: true,
                    target: destination,
                    manual: true,
                };
                combat.0 = None;
                area.0 = None;
            }
        }
        Ok(())
    }

    fn attack_order(&mut self, slots: &[usize], target: EntityId) -> Result<(), CommandError> {
        let units = self.order_units(slots)?;
        if units.is_empty() {
            return Err(CommandError::EmptyOrder);
        }
        let enemy = self
            .living_enemy(target)
            .ok_or(CommandError::EnemyNotFound(target))?;
        for (entity, _) in units {
            if let Ok((steering, combat, area)) = self
                .world
                .query_one_mut::<(&mut Steering, &mut CombatTarget, &mut AreaAttack)>(entity)
            {
                steering.manual = false;
                combat.0 = Some(enemy);
                area.0 = None;
            }
        }
        Ok(())
    }

    fn living_enemy(&self, id: EntityId) -> Option<Entity> {
        let entity = Entity::from_bits(id.0)?;
        let mut query = self.world.query_one::<(&Enemy, &Health)>(entity).ok()?;
        let alive = query.get().is_some_and(|(_, health)| health.alive);
        alive.then_some(entity)
    }

    fn area_order(&mut self, slots: &[usize], rect: Rect) -> Result<(), CommandError> {
        let units = self.order_units(slots)?;
        if units.is_empty() {
            return Err(CommandError::EmptyOrder);
        }

        let mut captured: Vec<(SpawnOrder, Entity)> = self
            .world
            .query::<(&Enemy, &Position, &BodySize, &Health, &SpawnOrder)>()
            .iter()
            .filter(|(_, (_, pos, size, health, _))| {
                health.alive && Rect::centered(**pos, size.width, size.height).intersects(&rect)
            })
            .map(|(entity, (_, _, _, _, order))| (*order, entity))
            .collect();
        captured.sort_by_key(|(order, _)| *order);
        let captured: Vec<Entity> = captured.into_iter().map(|(_, entity)| entity).collect();

        let squad = self.next_squad_id;
        self.next_squad_id += 1;
        for (entity, destination) in Self::formation(&units, rect.center()) {
            if let Ok((steering, combat, area)) = self
                .world
                .query_one_mut::<(&mut Steering, &mut CombatTarget, &mut AreaAttack)>(entity)
            {
                *steering = Steering {
                    moving: true,
                    target: destination,
                    manual: true,
                };
                combat.0 = None;
                area.0 = Some(AreaOrder {
                    squad,
                    rect,
                    captured: captured.clone(),
                });
            }
        }
        debug!(squad, units = units.len(), captured = captured.len(), "area order issued");

        // Spread the squad over the captured set right away.
        let enemies = living_sites::<Enemy>(&self.world);
        let mut plans = targeting::load_plans(&self.world);
        for i in 0..plans.len() {
            if plans[i].area.as_ref().map(|area| area.squad) != Some(squad) {
                continue;
            }
            let claimed = targeting::squad_claims(&plans, i, squad, &enemies);
            plans[i].target =
                targeting::pick_area_target(plans[i].position, &captured, &claimed, &enemies);
        }
        targeting::store_plans(&mut self.world, &plans);
        Ok(())
    }

    fn purchase_upgrade(&mut self, track: UpgradeTrack) -> Result<(), CommandError> {
        let Some((_entity, (_objective, levels))) = self
            .world
            .query_mut::<(&Objective, &mut UpgradeLevels)>()
            .into_iter()
            .next()
        else {
            return Err(CommandError::NoGameInProgress(self.phase));
        };

        let (spec, level) = self.economy.purchase(levels, track)?;
        debug!(track = track.as_str(), level, cost = spec.cost, scrap = self.economy.scrap, "upgrade purchased");
        self.events.push(SimEvent::UpgradePurchased {
            track,
            level,
            cost: spec.cost,
        });

        // Completing the last track wins even while paused.
        self.check_terminal();
        Ok(())
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let scaling = self.params.scaling(self.difficulty);

        // 1. Wave director (clear check, intermission, next wave)
        wave_director::run(
            &mut self.world,
            &mut self.rng,
            &mut self.seq,
            &mut self.wave,
            &mut self.economy,
            &mut self.events,
            &self.params,
            scaling,
            dt,
        );
        // 2. Per-frame resource assignment refresh
        self.mining.mark_dirty();
        // 3. Target assignment and healer follow
        let fire_requests = targeting::run(&mut self.world, &mut self.mining, &self.params);
        // 4. Unit steering
        systems::steering::run(&mut self.world, dt);
        // 5. Healing
        systems::healing::run(&mut self.world, dt);
        // 6. Combat and projectiles
        systems::combat::run(&mut self.world, &fire_requests, &self.params, dt);
        systems::projectiles::run(
            &mut self.world,
            &mut self.rng,
            &mut self.economy,
            &mut self.mining,
            &mut self.events,
            &self.params,
            dt,
        );
        // 7. Enemy behavior
        systems::enemy_ai::run(&mut self.world, &self.params, dt);
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 9. Terminal check
        self.check_terminal();
    }

    /// Enter defeat or victory when the objective is destroyed or complete.
    fn check_terminal(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        let Some((hp, levels)) = self
            .world
            .query::<(&Objective, &Health, &UpgradeLevels)>()
            .iter()
            .next()
            .map(|(_, (_, health, levels))| (health.hp, *levels))
        else {
            return;
        };

        let wave = self.wave.wave;
        if hp <= 0 {
            self.phase = GamePhase::Defeat;
            info!(wave, "objective destroyed");
            self.events.push(SimEvent::ObjectiveDestroyed { wave });
        } else if economy::is_complete(&levels) {
            self.phase = GamePhase::Victory;
            info!(wave, "objective complete");
            self.events.push(SimEvent::ObjectiveCompleted { wave });
        }
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> GameStateSnapshot {
        let ctx = SnapshotContext {
            time: self.time,
            phase: self.phase,
            difficulty: self.difficulty,
            time_scale: self.time_scale,
            wave: &self.wave,
            economy: &self.economy,
        };
        systems::snapshot::build_snapshot(&self.world, &ctx, events)
    }
}
