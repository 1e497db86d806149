//! Point-to-point steering.
//!
//! Units and enemies move by "go to point X" only. Projectiles integrate
//! velocity directly and never arrive, see `projectiles`.

use hecs::World;

use bastion_core::components::{Steering, Unit, UnitStats};
use bastion_core::constants::{ARRIVAL_EPSILON, DIRECTION_EPSILON};
use bastion_core::types::Position;

/// Advance `position` toward `target` by at most `speed * dt`.
///
/// Snaps onto the target and returns `true` when it is within reach this
/// frame. A zero-length move is a no-op that still counts as arrived.
pub fn step_toward(position: &mut Position, target: Position, speed: f64, dt: f64) -> bool {
    let delta = target.as_dvec2() - position.as_dvec2();
    let distance = delta.length();
    let step = speed * dt;

    if distance <= step || distance < ARRIVAL_EPSILON {
        *position = target;
        return true;
    }
    if distance > DIRECTION_EPSILON {
        *position = Position::from_dvec2(position.as_dvec2() + delta / distance * step);
    }
    false
}

/// Move every unit with a pending move intent.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (_unit, pos, steering, stats)) in
        world.query_mut::<(&Unit, &mut Position, &mut Steering, &UnitStats)>()
    {
        if !steering.moving {
            continue;
        }
        if step_toward(pos, steering.target, stats.speed, dt) {
            steering.moving = false;
            steering.manual = false;
        }
    }
}
