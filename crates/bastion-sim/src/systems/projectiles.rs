//! Projectile travel and hit resolution.
//!
//! A projectile hits the first living enemy whose box contains it. Only
//! when no enemy is hit are resource nodes tested. Damage is applied as
//! each projectile lands, so a later projectile in the same frame flies
//! through an enemy that is already dead.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use bastion_core::components::{BodySize, Enemy, Health, ResourceNode, ResourceYield, SpawnOrder};
use bastion_core::config::SimParams;
use bastion_core::enums::BurstPalette;
use bastion_core::events::SimEvent;
use bastion_core::types::{Position, Rect, Velocity};

use crate::orders::Projectile;
use crate::systems::economy::Economy;
use crate::systems::mining::MiningState;

#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Enemy,
    Node,
}

struct Hittable {
    entity: Entity,
    kind: Kind,
    order: SpawnOrder,
    bounds: Rect,
}

/// Move projectiles, retire strays and resolve hits.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    economy: &mut Economy,
    mining: &mut MiningState,
    events: &mut Vec<SimEvent>,
    params: &SimParams,
    dt: f64,
) {
    let mut targets = collect_hittables(world);

    let flights: Vec<(Entity, Position, Velocity, i32)> = world
        .query::<(&Position, &Velocity, &Projectile)>()
        .iter()
        .filter(|(_, (_, _, projectile))| projectile.active)
        .map(|(entity, (pos, vel, projectile))| (entity, *pos, *vel, projectile.damage))
        .collect();

    let margin = params.projectile_bounds_margin;
    for (entity, mut pos, vel, damage) in flights {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;

        let mut active = true;
        if pos.x < -margin
            || pos.y < -margin
            || pos.x > params.map_width + margin
            || pos.y > params.map_height + margin
        {
            active = false;
        } else if let Some(index) = struck_index(&targets, &pos) {
            active = false;
            let target = targets[index].entity;
            let kind = targets[index].kind;
            if apply_damage(world, target, damage) {
                targets.remove(index);
                on_death(world, rng, economy, mining, events, params, target, kind);
            }
        }

        if let Ok((stored, projectile)) =
            world.query_one_mut::<(&mut Position, &mut Projectile)>(entity)
        {
            *stored = pos;
            projectile.active = active;
        }
    }
}

/// Enemies take precedence over resource nodes, then spawn order decides.
fn struck_index(targets: &[Hittable], pos: &Position) -> Option<usize> {
    let hit = |kind: Kind| {
        targets
            .iter()
            .position(|t| t.kind == kind && t.bounds.contains(pos))
    };
    hit(Kind::Enemy).or_else(|| hit(Kind::Node))
}

fn collect_hittables(world: &World) -> Vec<Hittable> {
    let mut targets: Vec<Hittable> = Vec::new();
    for (entity, (_, pos, size, health, order)) in world
        .query::<(&Enemy, &Position, &BodySize, &Health, &SpawnOrder)>()
        .iter()
    {
        if health.alive {
            targets.push(Hittable {
                entity,
                kind: Kind::Enemy,
                order: *order,
                bounds: Rect::centered(*pos, size.width, size.height),
            });
        }
    }
    for (entity, (_, pos, size, health, order)) in world
        .query::<(&ResourceNode, &Position, &BodySize, &Health, &SpawnOrder)>()
        .iter()
    {
        if health.alive {
            targets.push(Hittable {
                entity,
                kind: Kind::Node,
                order: *order,
                bounds: Rect::centered(*pos, size.width, size.height),
            });
        }
    }
    targets.sort_by_key(|t| t.order);
    targets
}

/// Returns true when this hit killed the target.
fn apply_damage(world: &mut World, entity: Entity, damage: i32) -> bool {
    let Ok(mut health) = world.get::<&mut Health>(entity) else {
        return false;
    };
    if !health.alive {
        return false;
    }
    health.damaged = true;
    health.hp -= damage;
    if health.hp <= 0 {
        health.alive = false;
        return true;
    }
    false
}

#[allow(clippy::too_many_arguments)]
fn on_death(
    world: &World,
    rng: &mut ChaCha8Rng,
    economy: &mut Economy,
    mining: &mut MiningState,
    events: &mut Vec<SimEvent>,
    params: &SimParams,
    entity: Entity,
    kind: Kind,
) {
    let position = world
        .get::<&Position>(entity)
        .map(|pos| *pos)
        .unwrap_or_default();

    match kind {
        Kind::Enemy => {
            let band = params.enemy_kill_scrap;
            let scrap = rng.gen_range(band.min..=band.max);
            economy.earn(scrap);
            trace!(?entity, scrap, "enemy killed");
            events.push(SimEvent::DeathBurst {
                position,
                palette: BurstPalette::Alien,
                count: params.enemy_burst_count,
            });
        }
        Kind::Node => {
            let scrap = match world.get::<&ResourceYield>(entity) {
                Ok(yield_band) => rng.gen_range(yield_band.scrap_min..=yield_band.scrap_max),
                Err(_) => 0,
            };
            economy.earn(scrap);
            mining.mark_dirty();
            trace!(?entity, scrap, "resource node destroyed");
            events.push(SimEvent::DeathBurst {
                position,
                palette: BurstPalette::Rock,
                count: params.node_burst_count,
            });
        }
    }
}
