//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! plus whatever engine-level state they own. Cross-frame entity state
//! lives in components.

pub mod cleanup;
pub mod combat;
pub mod economy;
pub mod enemy_ai;
pub mod healing;
pub mod mining;
pub mod projectiles;
pub mod query;
pub mod snapshot;
pub mod steering;
pub mod targeting;
pub mod wave_director;
