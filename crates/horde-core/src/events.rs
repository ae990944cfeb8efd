//! Requests emitted by the simulation for the presentation layer.
//!
//! The core never renders, plays audio or instantiates objects itself; it
//! describes what should happen and the presentation carries it out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::LevelOutcome;
use crate::state::UpgradeChoiceView;
use crate::types::{EnemyKind, EntityHandle, WeaponId};

/// What kind of object a `SpawnEntity` request asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SpawnedEntity {
    Enemy { enemy_kind: EnemyKind },
    ExpOrb { value: u32 },
}

/// Outbound side effects, drained into every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationRequest {
    /// Instantiate an object for a newly simulated entity.
    SpawnEntity {
        handle: EntityHandle,
        entity: SpawnedEntity,
        position: Vec2,
        rotation: f32,
    },
    /// Destroy the object for an entity that left the simulation.
    DespawnEntity { handle: EntityHandle },
    /// Open the level-up panel with up to three choices.
    ShowLevelUpChoices { choices: Vec<UpgradeChoiceView> },
    /// The player reached a new level.
    NotifyLevelUp { new_level: usize },
    /// Stop (or restart) scaled-time presentation effects.
    FreezeSimulation { frozen: bool },
    /// Experience bar and level text.
    UpdateHud {
        current_exp: u32,
        required_exp: u32,
        level: usize,
    },
    /// Coin counter.
    UpdateCoins { balance: i64 },
    /// Player health bar.
    UpdatePlayerHealth { current: f32, max: f32 },
    /// A weapon's cooldown elapsed; the presentation resolves the attack.
    WeaponFired {
        weapon: WeaponId,
        damage: f32,
        speed: f32,
        size: f32,
        range: f32,
        projectile_count: u32,
        duration: f32,
    },
    /// Floating damage text.
    DamageNumber { position: Vec2, amount: f32 },
    /// Player health reached zero; the run is over.
    PlayerDied,
    /// Survival countdown display.
    UpdateTimer { remaining_secs: f32 },
    /// The countdown ran out: show the boss intro and bring on the boss.
    /// The simulation stays paused until `Resume`.
    BeginBossEncounter,
    /// Show the end screen.
    LevelEnded { outcome: LevelOutcome },
}
