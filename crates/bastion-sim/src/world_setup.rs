//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the objective, the squad, resource nodes, enemies and
//! projectiles with appropriate component bundles.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::config::{ScrapBand, SimParams};
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::types::{Position, Velocity};

use crate::orders::{AreaAttack, CombatTarget, MiningAssignment, Projectile};

/// Hands out monotonically increasing [`SpawnOrder`]s.
#[derive(Debug, Default)]
pub struct SpawnSequence {
    next: u64,
}

impl SpawnSequence {
    pub fn next(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next);
        self.next += 1;
        order
    }
}

/// Starting hit points and stats for a roster role.
pub fn roster_profile(role: UnitRole) -> (i32, UnitStats) {
    let (hp, fire_rate, range, damage, speed, heal_rate) = match role {
        UnitRole::Rifle => (220, 2.5, 140.0, 18, UNIT_BASE_SPEED, 0.0),
        UnitRole::Shotgun => (260, 1.8, 90.0, 30, 260.0, 0.0),
        UnitRole::Sniper => (180, 1.0, 240.0, 50, UNIT_BASE_SPEED, 0.0),
        UnitRole::Heavy => (340, 4.5, 160.0, 10, 160.0, 0.0),
        UnitRole::Rocket => (200, 0.7, 190.0, 75, UNIT_BASE_SPEED, 0.0),
        UnitRole::Healer => (240, 1.0, 150.0, 5, UNIT_BASE_SPEED, 40.0),
    };
    (
        hp,
        UnitStats {
            speed,
            fire_rate,
            range,
            damage,
            heal_rate,
        },
    )
}

/// Populate a fresh session: objective at the map center, the squad in a
/// ring around it and the initial resource field.
pub fn setup_session(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut SpawnSequence,
    params: &SimParams,
) {
    let center = Position::new(params.map_width / 2.0, params.map_height / 2.0);
    spawn_objective(world, seq, center);
    spawn_squad(world, seq, center);
    spawn_node_field(
        world,
        rng,
        seq,
        params,
        params.initial_node_count,
        params.initial_node_scrap,
    );
}

pub fn spawn_objective(world: &mut World, seq: &mut SpawnSequence, center: Position) -> Entity {
    world.spawn((
        Objective,
        center,
        BodySize {
            width: OBJECTIVE_WIDTH,
            height: OBJECTIVE_HEIGHT,
        },
        Health {
            hp: OBJECTIVE_MAX_HP,
            max_hp: OBJECTIVE_MAX_HP,
            alive: true,
            damaged: false,
        },
        UpgradeLevels::default(),
        seq.next(),
    ))
}

/// One unit per roster role, evenly spaced on a ring around `center`.
pub fn spawn_squad(world: &mut World, seq: &mut SpawnSequence, center: Position) {
    for (slot, role) in UnitRole::ROSTER.iter().enumerate() {
        let angle = slot as f64 / SQUAD_SIZE as f64 * TAU;
        let position = Position::new(
            center.x + angle.cos() * SQUAD_RING_RADIUS,
            center.y + angle.sin() * SQUAD_RING_RADIUS,
        );
        spawn_unit(world, seq, slot, *role, position);
    }
}

pub fn spawn_unit(
    world: &mut World,
    seq: &mut SpawnSequence,
    slot: usize,
    role: UnitRole,
    position: Position,
) -> Entity {
    let (hp, stats) = roster_profile(role);
    world.spawn((
        Unit,
        position,
        BodySize {
            width: UNIT_WIDTH,
            height: UNIT_HEIGHT,
        },
        Health {
            hp,
            max_hp: hp,
            alive: true,
            damaged: false,
        },
        SquadMember {
            slot,
            role,
            selected: false,
        },
        stats,
        Steering::default(),
        UnitTimers::default(),
        CombatTarget::default(),
        AreaAttack::default(),
        MiningAssignment::default(),
        seq.next(),
    ))
}

pub fn spawn_enemy(
    world: &mut World,
    seq: &mut SpawnSequence,
    position: Position,
    stats: EnemyStats,
    hp: i32,
) -> Entity {
    world.spawn((
        Enemy,
        position,
        BodySize {
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
        },
        Health {
            hp,
            max_hp: hp,
            alive: true,
            damaged: false,
        },
        stats,
        AttackClock::default(),
        seq.next(),
    ))
}

pub fn spawn_resource_node(
    world: &mut World,
    seq: &mut SpawnSequence,
    position: Position,
    hp: i32,
    scrap: ScrapBand,
) -> Entity {
    world.spawn((
        ResourceNode,
        position,
        BodySize {
            width: NODE_SIZE,
            height: NODE_SIZE,
        },
        Health {
            hp,
            max_hp: hp,
            alive: true,
            damaged: false,
        },
        ResourceYield {
            scrap_min: scrap.min,
            scrap_max: scrap.max,
        },
        seq.next(),
    ))
}

/// Scatter `count` nodes over the map, keeping clear of the objective.
pub fn spawn_node_field(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    seq: &mut SpawnSequence,
    params: &SimParams,
    count: usize,
    scrap: ScrapBand,
) {
    let objective = Position::new(params.map_width / 2.0, params.map_height / 2.0);
    for _ in 0..count {
        let mut position = Position::new(
            random_coordinate(rng, NODE_SPAWN_MARGIN, params.map_width),
            random_coordinate(rng, NODE_SPAWN_MARGIN, params.map_height),
        );
        if position.range_to(&objective) < NODE_OBJECTIVE_CLEARANCE {
            position.x += NODE_OBJECTIVE_CLEARANCE;
        }
        let hp = rng.gen_range(params.node_hp_min..=params.node_hp_max);
        spawn_resource_node(world, seq, position, hp, scrap);
    }
}

/// Uniform point on a random map edge, inset by the spawn margin.
pub fn random_edge_position(rng: &mut ChaCha8Rng, params: &SimParams) -> Position {
    let margin = ENEMY_SPAWN_MARGIN;
    match rng.gen_range(0..4) {
        0 => Position::new(random_coordinate(rng, margin, params.map_width), margin),
        1 => Position::new(
            random_coordinate(rng, margin, params.map_width),
            params.map_height - margin,
        ),
        2 => Position::new(margin, random_coordinate(rng, margin, params.map_height)),
        _ => Position::new(
            params.map_width - margin,
            random_coordinate(rng, margin, params.map_height),
        ),
    }
}

pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    velocity: Velocity,
    owner: Entity,
    damage: i32,
) -> Entity {
    world.spawn((
        origin,
        velocity,
        Projectile {
            owner,
            damage,
            active: true,
        },
    ))
}

/// Whole-unit coordinate in `[margin, extent - margin]`.
fn random_coordinate(rng: &mut ChaCha8Rng, margin: f64, extent: f64) -> f64 {
    let low = margin as i64;
    let high = ((extent - margin) as i64).max(low);
    rng.gen_range(low..=high) as f64
}
