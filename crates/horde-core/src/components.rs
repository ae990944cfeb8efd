//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::EnemyPhase;
use crate::types::EnemyKind;

/// World-space position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Velocity in world units per scaled second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Marks an entity as an enemy spawned by the wave scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Hit points of an enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
}

/// Per-enemy behaviour state driven by the AI crate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub phase: EnemyPhase,
    /// Seconds of knockback left.
    pub knockback_remaining: f32,
    /// Seconds until this enemy may damage the player again.
    pub hit_cooldown: f32,
}

/// Experience pickup dropped by a defeated enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpOrb {
    pub value: u32,
    /// Once set, the orb homes in on the player until collected.
    pub magnetized: bool,
    /// Homing speed (world units per second).
    pub speed: f32,
    /// Seconds until the next pickup-range check.
    pub check_timer: f32,
}
