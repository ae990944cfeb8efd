//! Simulation engine for HORDE.
//!
//! Owns the hecs ECS world, runs systems on a scaled fixed-rate clock, and
//! produces GameStateSnapshots for the presentation layer.

pub mod config;
pub mod engine;
pub mod player;
pub mod progression;
pub mod scenario;
pub mod stats;
pub mod systems;
pub mod weapon;
pub mod world_setup;

pub use config::GameConfig;
pub use engine::{SimConfig, SimulationEngine};
pub use horde_core as core;

#[cfg(test)]
mod tests;
