//! Components that hold references to other entities.
//!
//! These live next to the ECS rather than in the core crate because they
//! store `hecs::Entity` handles. A handle to a despawned entity never
//! resolves again, so every reader treats a failed lookup as "target lost".

use hecs::Entity;

use bastion_core::types::Rect;

/// Enemy a unit is committed to, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatTarget(pub Option<Entity>);

/// A squad-wide area attack in progress.
#[derive(Debug, Clone)]
pub struct AreaOrder {
    /// Units sharing a squad id coordinate their claims.
    pub squad: u32,
    pub rect: Rect,
    /// Enemies that were inside `rect` when the order was issued.
    pub captured: Vec<Entity>,
}

#[derive(Debug, Clone, Default)]
pub struct AreaAttack(pub Option<AreaOrder>);

/// Resource node a unit mines when it has nothing better to do.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiningAssignment(pub Option<Entity>);

/// A shot in flight.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Unit that fired it.
    pub owner: Entity,
    pub damage: i32,
    pub active: bool,
}
