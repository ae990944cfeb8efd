//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus whatever engine state
//! they need. Persistent per-entity state lives in components.

pub mod cleanup;
pub mod enemy_ai;
pub mod movement;
pub mod pickups;
pub mod run_timer;
pub mod snapshot;
pub mod spawn_point;
pub mod wave_spawner;
pub mod weapons;
