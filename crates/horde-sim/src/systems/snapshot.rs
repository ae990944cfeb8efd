//! Snapshot system: builds a complete GameStateSnapshot from engine state.
//!
//! This system is read-only; it never modifies the world.

use horde_core::enums::GamePhase;
use horde_core::events::PresentationRequest;
use horde_core::state::*;
use horde_core::types::{SimTime, WeaponId};

use crate::player::PlayerState;
use crate::progression::ProgressionTable;
use crate::stats::PlayerStats;
use crate::weapon::Arsenal;

use super::run_timer::RunTimer;
use super::wave_spawner::WaveScheduler;

/// Everything the snapshot reads from.
pub struct SnapshotSources<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: &'a PlayerState,
    pub stats: &'a PlayerStats,
    pub progression: &'a ProgressionTable,
    pub arsenal: &'a Arsenal,
    pub waves: &'a WaveScheduler,
    pub run_timer: &'a RunTimer,
    pub tracked_enemies: usize,
    pub pending_choices: &'a [WeaponId],
}

/// Build a complete GameStateSnapshot.
pub fn build_snapshot(sources: &SnapshotSources<'_>, requests: Vec<PresentationRequest>) -> GameStateSnapshot {
    GameStateSnapshot {
        time: sources.time,
        phase: sources.phase,
        player: build_player(sources.player, sources.stats),
        progression: build_progression(sources.progression),
        weapons: sources.arsenal.views(),
        wave: build_wave(sources.waves),
        timer: RunTimerView {
            remaining_secs: sources.run_timer.remaining(),
            expired: sources.run_timer.is_expired(),
        },
        tracked_enemies: sources.tracked_enemies,
        pending_choices: sources
            .pending_choices
            .iter()
            .filter_map(|&id| sources.arsenal.choice_view(id))
            .collect(),
        requests,
    }
}

fn build_player(player: &PlayerState, stats: &PlayerStats) -> PlayerView {
    PlayerView {
        position: player.position,
        health: player.health,
        max_health: player.max_health,
        move_speed: player.move_speed,
        pickup_range: player.pickup_range,
        max_weapons: player.max_weapons,
        coins: player.coins,
        stat_levels: stats.levels(),
    }
}

fn build_progression(progression: &ProgressionTable) -> ProgressionView {
    ProgressionView {
        level: progression.current_level(),
        current_exp: progression.current_experience(),
        required_exp: progression.required_for_next(),
        max_level: progression.curve().max_level(),
    }
}

fn build_wave(waves: &WaveScheduler) -> WaveView {
    WaveView {
        index: waves.current_wave_index(),
        enemy_kind: waves.current_wave().map(|w| w.enemy_kind.clone()),
        time_remaining: waves.wave_time_remaining().max(0.0),
    }
}
