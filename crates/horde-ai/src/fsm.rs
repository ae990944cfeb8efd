//! Enemy behaviour finite state machine.
//!
//! Pure functions that compute phase transitions and velocities for enemy
//! entities based on their current phase and the player's position.
//! No ECS dependency; operates on plain data.

use glam::Vec2;

use horde_core::constants::KNOCKBACK_SPEED_FACTOR;
use horde_core::enums::EnemyPhase;

/// Input to the enemy FSM for a single entity.
pub struct EnemyContext {
    pub phase: EnemyPhase,
    pub position: Vec2,
    /// Where the player currently is.
    pub target: Vec2,
    pub move_speed: f32,
    pub knockback_remaining: f32,
    pub player_alive: bool,
    /// Scaled seconds elapsed this tick.
    pub dt: f32,
}

/// Output from the enemy FSM.
#[derive(Debug, Clone, Copy)]
pub struct EnemyUpdate {
    pub new_phase: EnemyPhase,
    pub new_velocity: Vec2,
    pub knockback_remaining: f32,
    pub phase_changed: bool,
}

/// Evaluate the FSM for one enemy. Returns the updated phase and velocity.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    // Terminal state, no transitions
    if ctx.phase == EnemyPhase::Dead {
        return transition(ctx, EnemyPhase::Dead, Vec2::ZERO, 0.0);
    }

    if !ctx.player_alive {
        return transition(ctx, EnemyPhase::Idle, Vec2::ZERO, 0.0);
    }

    if ctx.phase == EnemyPhase::KnockedBack {
        return evaluate_knockback(ctx);
    }

    transition(ctx, EnemyPhase::Chase, chase_velocity(ctx), 0.0)
}

/// Start a knockback of `duration` seconds, interrupting any chase.
pub fn begin_knockback(phase: EnemyPhase, duration: f32) -> (EnemyPhase, f32) {
    match phase {
        EnemyPhase::Dead => (EnemyPhase::Dead, 0.0),
        _ if duration <= 0.0 => (phase, 0.0),
        _ => (EnemyPhase::KnockedBack, duration),
    }
}

fn evaluate_knockback(ctx: &EnemyContext) -> EnemyUpdate {
    let remaining = ctx.knockback_remaining - ctx.dt;
    if remaining <= 0.0 {
        return transition(ctx, EnemyPhase::Chase, chase_velocity(ctx), 0.0);
    }

    let retreat = -chase_velocity(ctx) * KNOCKBACK_SPEED_FACTOR;
    transition(ctx, EnemyPhase::KnockedBack, retreat, remaining)
}

/// Velocity straight at the target at the enemy's move speed.
fn chase_velocity(ctx: &EnemyContext) -> Vec2 {
    (ctx.target - ctx.position).normalize_or_zero() * ctx.move_speed
}

fn transition(
    ctx: &EnemyContext,
    new_phase: EnemyPhase,
    new_velocity: Vec2,
    knockback_remaining: f32,
) -> EnemyUpdate {
    EnemyUpdate {
        new_phase,
        new_velocity,
        knockback_remaining,
        phase_changed: new_phase != ctx.phase,
    }
}
