//! Commands sent from the presentation layer to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::StatKind;
use crate::types::{EntityHandle, WeaponId};

/// All inbound events the core reacts to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run control ---
    /// Start a new run: stats reset, first weapon granted, waves begin.
    StartRun,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = stopped).
    SetTimeScale { scale: f32 },

    // --- Player ---
    /// The presentation moved the player; spawn boundary and AI follow it.
    PlayerMoved { position: Vec2 },
    /// Raw damage applied to the player.
    PlayerDamaged { amount: f32 },

    // --- Enemies ---
    /// A weapon hit an enemy.
    EnemyHit {
        entity: EntityHandle,
        damage: f32,
        knockback: bool,
    },
    /// An enemy touched the player; applies its contact damage if off cooldown.
    EnemyContact { entity: EntityHandle },
    /// The presentation resolved a kill itself. Drops an experience orb.
    EnemyDefeated {
        entity: Option<EntityHandle>,
        position: Vec2,
        exp_value: u32,
    },
    /// The boss spawned by the encounter was killed; the level is won.
    BossDefeated,

    // --- Economy & upgrades ---
    /// Coins picked up.
    CurrencyEarned { amount: u32 },
    /// Buy the next tier of a player stat.
    PurchaseStat { stat: StatKind },
    /// Pick one of the offered level-up choices.
    SelectUpgrade { weapon: WeaponId },
    /// Close the level-up panel without choosing.
    SkipUpgrade,
}
