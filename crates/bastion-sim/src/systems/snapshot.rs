//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use bastion_core::components::*;
use bastion_core::enums::{Difficulty, GamePhase};
use bastion_core::events::SimEvent;
use bastion_core::state::*;
use bastion_core::types::{EntityId, Position, SimTime, Velocity};

use crate::orders::{AreaAttack, CombatTarget, MiningAssignment, Projectile};
use crate::systems::economy::{self, Economy};
use crate::systems::wave_director::{self, WaveState};

/// Engine-level state the snapshot reports alongside the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub time_scale: f64,
    pub wave: &'a WaveState,
    pub economy: &'a Economy,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, ctx: &SnapshotContext, events: Vec<SimEvent>) -> GameStateSnapshot {
    let objective = build_objective(world);

    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        units: build_units(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        resource_nodes: build_resource_nodes(world),
        hud: HudView {
            wave: ctx.wave.wave,
            enemies_remaining: wave_director::enemies_remaining(world),
            scrap: ctx.economy.scrap,
            intermission_remaining: ctx.wave.intermission.map(|secs| secs.max(0.0)),
            difficulty: ctx.difficulty,
            difficulty_label: ctx.difficulty.label().to_string(),
            time_scale: ctx.time_scale,
            paused: ctx.phase == GamePhase::Paused,
            upgrades: ctx.economy.shop(&objective.upgrades),
            objective_complete: objective.complete,
        },
        objective,
        events,
    }
}

fn id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Build UnitView list in roster slot order.
fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(
            &Unit,
            &SquadMember,
            &Position,
            &BodySize,
            &Health,
            &UnitStats,
            &Steering,
            &CombatTarget,
            &MiningAssignment,
            &AreaAttack,
        )>()
        .iter()
        .map(
            |(_, (_, member, pos, size, health, stats, steering, target, mining, area))| {
                let (display_x, display_y) = pos.display_corner(size.width, size.height);
                UnitView {
                    slot: member.slot,
                    role: member.role,
                    position: *pos,
                    display_x,
                    display_y,
                    width: size.width,
                    height: size.height,
                    hp: health.hp,
                    max_hp: health.max_hp,
                    range: stats.range,
                    selected: member.selected,
                    moving: steering.moving,
                    move_target: steering.moving.then_some(steering.target),
                    target: target.0.map(id),
                    mining: mining.0.map(id),
                    area_rect: area.0.as_ref().map(|order| order.rect),
                }
            },
        )
        .collect();

    units.sort_by_key(|u| u.slot);
    units
}

/// Build EnemyView list of living enemies in spawn order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(SpawnOrder, EnemyView)> = world
        .query::<(&Enemy, &EnemyStats, &Position, &BodySize, &Health, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, _, _, _, health, _))| health.alive)
        .map(|(entity, (_, stats, pos, size, health, order))| {
            (
                *order,
                EnemyView {
                    id: id(entity),
                    archetype: stats.archetype,
                    position: *pos,
                    width: size.width,
                    height: size.height,
                    hp: health.hp,
                    max_hp: health.max_hp,
                    show_health_bar: health.damaged,
                },
            )
        })
        .collect();

    enemies.sort_by_key(|(order, _)| *order);
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (projectile, _, _))| projectile.active)
        .map(|(_, (projectile, pos, vel))| ProjectileView {
            owner: id(projectile.owner),
            position: *pos,
            velocity: *vel,
            speed: vel.speed(),
        })
        .collect()
}

/// Build ResourceNodeView list of standing nodes in spawn order.
fn build_resource_nodes(world: &World) -> Vec<ResourceNodeView> {
    let mut nodes: Vec<(SpawnOrder, ResourceNodeView)> = world
        .query::<(&ResourceNode, &Position, &BodySize, &Health, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, _, _, health, _))| health.alive)
        .map(|(entity, (_, pos, size, health, order))| {
            (
                *order,
                ResourceNodeView {
                    id: id(entity),
                    position: *pos,
                    width: size.width,
                    height: size.height,
                    hp: health.hp,
                    max_hp: health.max_hp,
                    show_health_bar: health.damaged,
                },
            )
        })
        .collect();

    nodes.sort_by_key(|(order, _)| *order);
    nodes.into_iter().map(|(_, view)| view).collect()
}

fn build_objective(world: &World) -> ObjectiveView {
    world
        .query::<(&Objective, &Position, &BodySize, &Health, &UpgradeLevels)>()
        .iter()
        .next()
        .map(|(_, (_, pos, size, health, levels))| ObjectiveView {
            position: *pos,
            width: size.width,
            height: size.height,
            hp: health.hp,
            max_hp: health.max_hp,
            upgrades: *levels,
            complete: economy::is_complete(levels),
        })
        .unwrap_or_default()
}
