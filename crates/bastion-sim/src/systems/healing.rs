//! Healer aura and contact healing.
//!
//! Healing accrues in a per-unit fractional accumulator and is moved into
//! hit points one whole point at a time.

use hecs::{Entity, World};

use bastion_core::components::{BodySize, Health, SquadMember, Unit, UnitStats, UnitTimers};
use bastion_core::constants::MEDIC_CONTACT_FACTOR;
use bastion_core::types::{Position, Rect};

struct Healer {
    entity: Entity,
    position: Position,
    body: Rect,
    range: f64,
    rate: f64,
}

/// Apply one frame of healing from every healer.
pub fn run(world: &mut World, dt: f64) {
    let healers: Vec<Healer> = world
        .query::<(&Unit, &SquadMember, &Position, &BodySize, &UnitStats)>()
        .iter()
        .filter(|(_, (_, member, _, _, stats))| member.role.is_healer() && stats.heal_rate > 0.0)
        .map(|(entity, (_, _, pos, size, stats))| Healer {
            entity,
            position: *pos,
            body: Rect::centered(*pos, size.width, size.height),
            range: stats.range,
            rate: stats.heal_rate,
        })
        .collect();

    for healer in &healers {
        for (entity, (_, pos, size, health, timers)) in
            world.query_mut::<(&Unit, &Position, &BodySize, &mut Health, &mut UnitTimers)>()
        {
            if entity == healer.entity || health.hp >= health.max_hp {
                continue;
            }

            let mut amount = 0.0;
            let distance = healer.position.range_to(pos);
            if distance <= healer.range {
                let falloff = ((healer.range - distance) / healer.range).max(0.0);
                amount += healer.rate * falloff * dt;
            }
            if healer.body.intersects(&Rect::centered(*pos, size.width, size.height)) {
                amount += healer.rate * MEDIC_CONTACT_FACTOR * dt;
            }
            if amount > 0.0 {
                apply_heal(health, timers, amount);
            }
        }
    }
}

/// Accrue `amount` and transfer whole points. Reaching max hp clamps and
/// discards any leftover fraction.
pub fn apply_heal(health: &mut Health, timers: &mut UnitTimers, amount: f64) {
    timers.heal_fraction += amount;
    let whole = timers.heal_fraction.floor();
    if whole < 1.0 {
        return;
    }
    health.hp += whole as i32;
    timers.heal_fraction -= whole;
    if health.hp >= health.max_hp {
        health.hp = health.max_hp;
        timers.heal_fraction = 0.0;
    }
}
