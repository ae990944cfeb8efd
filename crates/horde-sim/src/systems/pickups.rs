//! Experience orb pickups.
//!
//! Idle orbs check the player's distance every check interval. Once inside
//! the pickup range an orb magnetizes: its speed gains the player's move
//! speed and it homes in until collected. Any orb within the collect radius
//! is collected, magnetized or not.

use glam::Vec2;
use hecs::{Entity, World};

use horde_core::components::{ExpOrb, Position};
use horde_core::events::PresentationRequest;

use super::movement::move_towards;
use crate::world_setup::handle_of;

/// Player state the pickup check needs.
#[derive(Debug, Clone, Copy)]
pub struct PickupContext {
    pub player_position: Vec2,
    pub pickup_range: f32,
    pub player_move_speed: f32,
    pub check_interval: f32,
    pub collect_radius: f32,
    pub dt: f32,
}

/// Advance every orb and collect those that reached the player.
///
/// Returns the value of each collected orb, one entry per orb.
pub fn run(
    world: &mut World,
    ctx: &PickupContext,
    despawn_buffer: &mut Vec<Entity>,
    requests: &mut Vec<PresentationRequest>,
) -> Vec<u32> {
    despawn_buffer.clear();
    let mut collected = Vec::new();

    for (entity, (pos, orb)) in world.query_mut::<(&mut Position, &mut ExpOrb)>() {
        if orb.magnetized {
            pos.0 = move_towards(pos.0, ctx.player_position, orb.speed * ctx.dt);
        } else {
            orb.check_timer -= ctx.dt;
            if orb.check_timer <= 0.0 {
                orb.check_timer = ctx.check_interval;
                if pos.0.distance(ctx.player_position) < ctx.pickup_range {
                    orb.magnetized = true;
                    orb.speed += ctx.player_move_speed;
                }
            }
        }

        if pos.0.distance(ctx.player_position) <= ctx.collect_radius {
            collected.push(orb.value);
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if world.despawn(entity).is_ok() {
            requests.push(PresentationRequest::DespawnEntity {
                handle: handle_of(entity),
            });
        }
    }
    collected
}
