//! Weapon cooldowns and projectile launch.

use hecs::World;

use bastion_core::components::{Unit, UnitStats, UnitTimers};
use bastion_core::config::SimParams;
use bastion_core::types::Velocity;

use crate::systems::targeting::FireRequest;
use crate::world_setup;

/// Tick every unit's cooldown, then launch one projectile per fire request
/// whose shooter is ready.
pub fn run(world: &mut World, requests: &[FireRequest], params: &SimParams, dt: f64) {
    for (_entity, (_unit, timers)) in world.query_mut::<(&Unit, &mut UnitTimers)>() {
        if timers.fire_cooldown > 0.0 {
            timers.fire_cooldown = (timers.fire_cooldown - dt).max(0.0);
        }
    }

    for request in requests {
        let Ok((stats, timers)) =
            world.query_one_mut::<(&UnitStats, &mut UnitTimers)>(request.shooter)
        else {
            continue;
        };
        if timers.fire_cooldown > 0.0 || stats.fire_rate <= 0.0 {
            continue;
        }
        timers.fire_cooldown = 1.0 / stats.fire_rate;
        let damage = stats.damage;

        let direction = request.origin.direction_to(&request.aim);
        let velocity = Velocity::from_dvec2(direction * params.projectile_speed);
        world_setup::spawn_projectile(
            world,
            request.origin,
            velocity,
            request.shooter,
            damage,
        );
    }
}
