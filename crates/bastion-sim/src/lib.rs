//! Simulation engine for Bastion.
//!
//! Owns the hecs ECS world, runs systems once per rendered frame,
//! and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod errors;
pub mod orders;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use errors::CommandError;
