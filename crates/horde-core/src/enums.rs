//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
///
/// Only `Active` advances the scaled clock; every other phase freezes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    /// Waiting for the player to pick one of the offered upgrades.
    LevelUpSelection,
    Paused,
    /// The player died.
    GameOver,
    /// The boss fell; the level is won.
    LevelComplete,
}

impl GamePhase {
    /// Whether the scaled clock is stopped in this phase.
    pub fn is_frozen(self) -> bool {
        !matches!(self, GamePhase::Active)
    }
}

/// How a level ended, for the end screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOutcome {
    /// Died to the horde before the countdown ran out.
    Overwhelmed,
    /// Died after the countdown, during the boss encounter.
    SlainByBoss,
    /// Defeated the boss.
    BossDefeated,
}

/// Purchasable player attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    MoveSpeed,
    Health,
    PickupRange,
    MaxWeapons,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::MoveSpeed,
        StatKind::Health,
        StatKind::PickupRange,
        StatKind::MaxWeapons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveSpeed => "move_speed",
            Self::Health => "health",
            Self::PickupRange => "pickup_range",
            Self::MaxWeapons => "max_weapons",
        }
    }
}

/// Enemy behaviour phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    /// Moving straight at the player.
    #[default]
    Chase,
    /// Pushed back after a knockback hit.
    KnockedBack,
    /// Standing still (player is dead).
    Idle,
    /// Health reached zero.
    Dead,
}

/// Where a weapon sits in the player's collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponStatus {
    /// Not acquired yet; can be offered as an unlock.
    #[default]
    Inactive,
    /// Owned and still upgradable.
    Active,
    /// Owned with every tier exhausted; never offered again.
    FullyLeveled,
}
