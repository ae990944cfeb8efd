//! Wave scheduler: cycles through configured waves and emits spawn requests.
//!
//! Each wave has a duration and a spawn interval. Both timers run on the
//! scaled clock. After the last wave the sequence wraps back to the first.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use horde_core::types::EnemyKind;

use super::spawn_point::{self, SpawnBoundary};

/// One wave: which enemy, for how long, how often.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub enemy_kind: EnemyKind,
    /// Seconds before moving on to the next wave.
    pub wave_duration: f32,
    /// Seconds between spawns.
    pub spawn_interval: f32,
}

impl WaveDefinition {
    pub fn new(enemy_kind: impl Into<EnemyKind>, wave_duration: f32, spawn_interval: f32) -> Self {
        Self {
            enemy_kind: enemy_kind.into(),
            wave_duration,
            spawn_interval,
        }
    }
}

/// An enemy the scheduler wants spawned this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub enemy_kind: EnemyKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchedulerState {
    #[default]
    Inactive,
    WaveActive,
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    waves: Vec<WaveDefinition>,
    current_wave: Option<usize>,
    wave_time_remaining: f32,
    spawn_time_remaining: f32,
    boundary: SpawnBoundary,
    anchored: SpawnBoundary,
    state: SchedulerState,
}

impl WaveScheduler {
    pub fn new(waves: Vec<WaveDefinition>, boundary: SpawnBoundary) -> Self {
        Self {
            waves,
            current_wave: None,
            wave_time_remaining: 0.0,
            spawn_time_remaining: 0.0,
            boundary,
            anchored: boundary,
            state: SchedulerState::Inactive,
        }
    }

    /// Begin the first wave. With no waves configured the scheduler stays
    /// inactive and never spawns.
    pub fn start(&mut self) {
        if self.waves.is_empty() {
            warn!("no waves configured, nothing will spawn");
            return;
        }
        self.state = SchedulerState::WaveActive;
        self.advance_wave();
    }

    /// Move to the next wave, wrapping after the last, and reset both timers.
    pub fn advance_wave(&mut self) {
        if self.waves.is_empty() {
            return;
        }
        let next = match self.current_wave {
            Some(index) if index + 1 < self.waves.len() => index + 1,
            _ => 0,
        };
        let wave = &self.waves[next];
        self.current_wave = Some(next);
        self.wave_time_remaining = wave.wave_duration;
        self.spawn_time_remaining = wave.spawn_interval;
        info!(wave = next, kind = %wave.enemy_kind, "wave started");
    }

    /// Keep the spawn rectangle centred on `anchor`.
    pub fn recenter(&mut self, anchor: Vec2) {
        self.anchored = self.boundary.anchored(anchor);
    }

    /// Advance both timers by `dt` scaled seconds.
    ///
    /// The wave timer is checked first, so a wave change resets the spawn
    /// interval before this same tick can spawn. At most one spawn per tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, anchor: Vec2, rng: &mut R) -> Option<SpawnRequest> {
        self.recenter(anchor);
        if self.state != SchedulerState::WaveActive {
            return None;
        }

        self.wave_time_remaining -= dt;
        if self.wave_time_remaining <= 0.0 {
            self.advance_wave();
        }

        let wave = &self.waves[self.current_wave?];
        self.spawn_time_remaining -= dt;
        if self.spawn_time_remaining > 0.0 {
            return None;
        }
        self.spawn_time_remaining = wave.spawn_interval;
        Some(SpawnRequest {
            enemy_kind: wave.enemy_kind.clone(),
            position: spawn_point::select(&self.anchored, rng),
        })
    }

    /// Back to the pre-start state for a new run.
    pub fn reset(&mut self) {
        self.current_wave = None;
        self.wave_time_remaining = 0.0;
        self.spawn_time_remaining = 0.0;
        self.state = SchedulerState::Inactive;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn current_wave_index(&self) -> Option<usize> {
        self.current_wave
    }

    pub fn current_wave(&self) -> Option<&WaveDefinition> {
        self.waves.get(self.current_wave?)
    }

    pub fn wave_time_remaining(&self) -> f32 {
        self.wave_time_remaining
    }

    pub fn spawn_time_remaining(&self) -> f32 {
        self.spawn_time_remaining
    }

    /// The spawn rectangle around the player's last known position.
    pub fn boundary(&self) -> &SpawnBoundary {
        &self.anchored
    }

    pub fn waves(&self) -> &[WaveDefinition] {
        &self.waves
    }
}
