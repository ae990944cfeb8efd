//! Entity spawn factories for the simulation world.
//!
//! Creates enemy and experience orb entities with their component bundles,
//! and converts between hecs entities and the handles the presentation sees.

use glam::Vec2;
use hecs::{Entity, World};

use horde_ai::profiles::EnemyProfile;
use horde_core::components::*;
use horde_core::types::{EnemyKind, EntityHandle};

/// Stable handle for an entity, valid until it is despawned.
pub fn handle_of(entity: Entity) -> EntityHandle {
    EntityHandle(entity.to_bits().get())
}

/// The entity behind a handle. `None` for bits that can never be an entity;
/// a handle to a despawned entity still converts, and fails on lookup.
pub fn entity_of(handle: EntityHandle) -> Option<Entity> {
    Entity::from_bits(handle.0)
}

/// Spawn an enemy of `kind` at full health, chasing.
pub fn spawn_enemy(world: &mut World, kind: &EnemyKind, profile: &EnemyProfile, position: Vec2) -> Entity {
    world.spawn((
        Enemy { kind: kind.clone() },
        Position(position),
        Velocity::default(),
        Health {
            current: profile.health,
        },
        EnemyBrain::default(),
    ))
}

/// Spawn an idle experience orb. Its first range check happens after one
/// full check interval.
pub fn spawn_exp_orb(world: &mut World, position: Vec2, value: u32, base_speed: f32, check_interval: f32) -> Entity {
    world.spawn((
        Position(position),
        ExpOrb {
            value,
            magnetized: false,
            speed: base_speed,
            check_timer: check_interval,
        },
    ))
}
