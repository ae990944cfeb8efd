//! Enemy AI system: runs the FSM for every enemy and applies its output.
//!
//! Also counts down each enemy's contact-hit cooldown.

use glam::Vec2;
use hecs::World;

use horde_ai::fsm::{self, EnemyContext};
use horde_ai::profiles::{get_profile, EnemyRoster};
use horde_core::components::{Enemy, EnemyBrain, Position, Velocity};

pub fn run(world: &mut World, roster: &EnemyRoster, player_position: Vec2, player_alive: bool, dt: f32) {
    for (_entity, (enemy, pos, vel, brain)) in
        world.query_mut::<(&Enemy, &Position, &mut Velocity, &mut EnemyBrain)>()
    {
        let profile = get_profile(roster, &enemy.kind);
        let update = fsm::evaluate(&EnemyContext {
            phase: brain.phase,
            position: pos.0,
            target: player_position,
            move_speed: profile.move_speed,
            knockback_remaining: brain.knockback_remaining,
            player_alive,
            dt,
        });

        brain.phase = update.new_phase;
        brain.knockback_remaining = update.knockback_remaining;
        vel.0 = update.new_velocity;

        if brain.hit_cooldown > 0.0 {
            brain.hit_cooldown = (brain.hit_cooldown - dt).max(0.0);
        }
    }
}
