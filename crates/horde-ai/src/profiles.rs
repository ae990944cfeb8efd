//! Kind-specific enemy profiles.
//!
//! Consolidates per-kind parameters for the enemy FSM and for the damage
//! and reward rules the simulation applies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use horde_core::constants::*;
use horde_core::types::EnemyKind;

/// Behavioural profile for an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyProfile {
    /// Chase speed (world units per second).
    pub move_speed: f32,
    /// Damage dealt to the player on contact.
    pub damage: f32,
    /// Starting hit points.
    pub health: f32,
    /// Minimum seconds between two contact hits on the player.
    pub hit_wait_time: f32,
    /// Seconds an enemy retreats after a knockback hit.
    pub knockback_time: f32,
    /// Experience carried by the orb it drops.
    pub exp_to_give: u32,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_ENEMY_MOVE_SPEED,
            damage: DEFAULT_ENEMY_DAMAGE,
            health: DEFAULT_ENEMY_HEALTH,
            hit_wait_time: DEFAULT_ENEMY_HIT_WAIT_SECS,
            knockback_time: DEFAULT_ENEMY_KNOCKBACK_SECS,
            exp_to_give: DEFAULT_ENEMY_EXP,
        }
    }
}

/// Profiles keyed by enemy kind.
pub type EnemyRoster = HashMap<EnemyKind, EnemyProfile>;

/// Get the profile for `kind`, falling back to the default profile for
/// kinds the roster does not know.
pub fn get_profile(roster: &EnemyRoster, kind: &EnemyKind) -> EnemyProfile {
    roster.get(kind).copied().unwrap_or_default()
}
