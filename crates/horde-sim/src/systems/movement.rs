//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.

use glam::Vec2;
use hecs::World;

use horde_core::components::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * dt;
    }
}

/// Step from `current` toward `target` by at most `max_step`, never
/// overshooting.
pub fn move_towards(current: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_step || distance == 0.0 {
        target
    } else {
        current + delta / distance * max_step
    }
}
