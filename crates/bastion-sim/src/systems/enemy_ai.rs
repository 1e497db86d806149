//! Enemy behavior system.
//!
//! Builds a context per living enemy, asks bastion-enemy-ai for a decision
//! and applies the resulting movement and damage to the world.

use hecs::{Entity, World};

use bastion_core::components::{AttackClock, Enemy, EnemyStats, Health, Objective, SpawnOrder, Unit};
use bastion_core::config::SimParams;
use bastion_core::types::Position;

use bastion_enemy_ai::fsm::{evaluate, EnemyContext, EnemyIntent, EngageTarget, UnitSighting};

use crate::systems::query::{living_sites, nearest};
use crate::systems::steering::step_toward;

/// Run the enemy behavior system for one frame.
pub fn run(world: &mut World, params: &SimParams, dt: f64) {
    let units = living_sites::<Unit>(world);

    let objective = world
        .query::<(&Objective, &Position)>()
        .iter()
        .map(|(entity, (_, pos))| (entity, *pos))
        .next();

    let mut enemies: Vec<(SpawnOrder, Entity)> = world
        .query::<(&Enemy, &Health, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, health, _))| health.alive)
        .map(|(entity, (_, _, order))| (*order, entity))
        .collect();
    enemies.sort_by_key(|(order, _)| *order);

    for (_, entity) in enemies {
        let Ok((position, stats, clock)) =
            world.query_one_mut::<(&mut Position, &EnemyStats, &mut AttackClock)>(entity)
        else {
            continue;
        };
        clock.since_last_attack += dt;

        let nearest_unit = nearest(*position, &units);
        let (objective_position, objective_distance) = match objective {
            Some((_, pos)) => (pos, position.range_to(&pos)),
            None => (*position, f64::INFINITY),
        };

        let ctx = EnemyContext {
            position: *position,
            stats: *stats,
            nearest_unit: nearest_unit.map(|(site, distance)| UnitSighting {
                position: site.position,
                distance,
            }),
            objective_position,
            objective_distance,
            objective_buffer: params.objective_priority_buffer,
            attack_ready: clock.since_last_attack >= stats.attack_cooldown,
        };

        let strike = match evaluate(&ctx) {
            EnemyIntent::Idle | EnemyIntent::Hold { .. } => None,
            EnemyIntent::Avoid { to, .. } => {
                step_toward(position, to, stats.speed, dt);
                None
            }
            EnemyIntent::Approach { point, .. } => {
                step_toward(position, point, stats.speed, dt);
                None
            }
            EnemyIntent::Attack { target } => {
                clock.since_last_attack = 0.0;
                let victim = match target {
                    EngageTarget::Unit => nearest_unit.map(|(site, _)| site.entity),
                    EngageTarget::Objective => objective.map(|(entity, _)| entity),
                };
                victim.map(|victim| (victim, stats.damage))
            }
        };

        if let Some((victim, damage)) = strike {
            if let Ok(mut health) = world.get::<&mut Health>(victim) {
                health.hp = (health.hp - damage).max(0);
                if health.hp < health.max_hp {
                    health.damaged = true;
                }
            }
        }
    }
}
