//! Cleanup system: removes dead enemies, destroyed nodes and spent projectiles.

use hecs::{Entity, World};

use bastion_core::components::{Enemy, Health, ResourceNode};

use crate::orders::Projectile;

/// Despawn everything that finished this frame.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_enemy, health)) in world.query_mut::<(&Enemy, &Health)>() {
        if !health.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (_node, health)) in world.query_mut::<(&ResourceNode, &Health)>() {
        if !health.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
