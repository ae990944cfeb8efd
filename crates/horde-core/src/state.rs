//! Game state snapshot: the complete visible state sent to the presentation each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::PresentationRequest;
use crate::types::{EnemyKind, SimTime, WeaponId};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub progression: ProgressionView,
    pub weapons: Vec<WeaponView>,
    pub wave: WaveView,
    pub timer: RunTimerView,
    /// Enemies currently registered with the culling sweep.
    pub tracked_enemies: usize,
    /// Choices on the open level-up panel (empty when closed).
    pub pending_choices: Vec<UpgradeChoiceView>,
    /// Side effects produced since the previous snapshot.
    pub requests: Vec<PresentationRequest>,
}

/// Player attributes derived from the stat tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub move_speed: f32,
    pub pickup_range: f32,
    pub max_weapons: u32,
    pub coins: i64,
    /// Current tier of each stat, in `StatKind::ALL` order.
    pub stat_levels: [usize; 4],
}

/// Experience bar state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionView {
    pub level: usize,
    pub current_exp: u32,
    pub required_exp: u32,
    pub max_level: usize,
}

/// One weapon in the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub id: WeaponId,
    pub name: String,
    pub level: usize,
    pub max_level: usize,
    pub status: WeaponStatus,
}

/// Wave scheduler state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// `None` before the first wave starts.
    pub index: Option<usize>,
    pub enemy_kind: Option<EnemyKind>,
    pub time_remaining: f32,
}

/// Survival countdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunTimerView {
    pub remaining_secs: f32,
    /// True once the countdown has run out and the boss is on its way.
    pub expired: bool,
}

/// A button on the level-up panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeChoiceView {
    pub weapon: WeaponId,
    pub name: String,
    /// Level the weapon is at now (0 for an unlock).
    pub level: usize,
    pub description: String,
    /// True when choosing it acquires a weapon rather than upgrading one.
    pub unlock: bool,
}
