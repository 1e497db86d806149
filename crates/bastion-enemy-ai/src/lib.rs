//! Enemy AI for BASTION.
//!
//! Implements the per-frame engagement decision for hostiles and the
//! archetype profiles used when a wave is spawned.

pub mod fsm;
pub mod profiles;

pub use bastion_core as core;
