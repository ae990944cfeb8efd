//! Game configuration, loadable from JSON.
//!
//! Every section has a default (see `scenario`) so a config file only needs
//! the fields it wants to override.

use serde::{Deserialize, Serialize};

use horde_ai::profiles::EnemyRoster;
use horde_core::constants::*;
use horde_core::enums::StatKind;
use horde_core::error::{ConfigError, ConfigResult};

use crate::progression::LevelCurve;
use crate::scenario;
use crate::stats::{PlayerStats, StatLevelEntry};
use crate::systems::spawn_point::SpawnBoundary;
use crate::systems::wave_spawner::WaveDefinition;
use crate::weapon::{Arsenal, WeaponLevelEntry};

/// Everything the engine needs to run a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub level_curve: LevelCurveConfig,
    pub stats: StatsConfig,
    pub weapons: Vec<WeaponConfig>,
    pub waves: Vec<WaveDefinition>,
    pub enemies: EnemyRoster,
    /// Spawn rectangle, relative to the player.
    pub spawn_boundary: SpawnBoundary,
    pub culling: CullingConfig,
    pub pickups: PickupConfig,
    /// Scaled seconds to survive before the boss encounter.
    pub run_duration_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        scenario::default_game()
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let mut config: GameConfig = serde_json::from_str(json)?;
        config.spawn_boundary = SpawnBoundary::new(config.spawn_boundary.min, config.spawn_boundary.max);
        config.validate()?;
        Ok(config)
    }

    /// Check every table and setting, building the tables once to do so.
    pub fn validate(&self) -> ConfigResult<()> {
        LevelCurve::generate(&self.level_curve.seed, self.level_curve.level_count)?;
        PlayerStats::from_config(&self.stats)?;
        Arsenal::from_config(&self.weapons)?;

        for wave in &self.waves {
            positive("wave_duration", wave.wave_duration)?;
            positive("spawn_interval", wave.spawn_interval)?;
        }
        positive("culling.interval_secs", self.culling.interval_secs)?;
        if self.culling.batch_size == 0 {
            return Err(ConfigError::NonPositiveSetting {
                setting: "culling.batch_size",
            });
        }
        positive("pickups.check_interval_secs", self.pickups.check_interval_secs)?;
        positive("pickups.collect_radius", self.pickups.collect_radius)?;
        positive("run_duration_secs", self.run_duration_secs)?;
        Ok(())
    }

    /// Distance from the player beyond which enemies are culled: the far
    /// corner of the spawn boundary plus a margin.
    pub fn despawn_distance(&self) -> f32 {
        self.spawn_boundary.far_corner_distance() + self.culling.margin
    }
}

fn positive(setting: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveSetting { setting })
    }
}

/// Seed thresholds for the experience curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCurveConfig {
    pub seed: Vec<u32>,
    pub level_count: usize,
}

/// Seed tiers for one stat. Without a `level_count` the seed is the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatTableConfig {
    pub seed: Vec<StatLevelEntry>,
    #[serde(default)]
    pub level_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    pub move_speed: StatTableConfig,
    pub health: StatTableConfig,
    pub pickup_range: StatTableConfig,
    pub max_weapons: StatTableConfig,
}

impl Default for StatsConfig {
    fn default() -> Self {
        scenario::default_stats()
    }
}

impl StatsConfig {
    pub fn get(&self, kind: StatKind) -> &StatTableConfig {
        match kind {
            StatKind::MoveSpeed => &self.move_speed,
            StatKind::Health => &self.health,
            StatKind::PickupRange => &self.pickup_range,
            StatKind::MaxWeapons => &self.max_weapons,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub name: String,
    pub levels: Vec<WeaponLevelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    pub interval_secs: f32,
    pub batch_size: usize,
    /// Added to the spawn boundary's far corner distance.
    pub margin: f32,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            interval_secs: CULL_INTERVAL_SECS,
            batch_size: CULL_BATCH_SIZE,
            margin: DESPAWN_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Seconds between an idle orb's range checks.
    pub check_interval_secs: f32,
    pub collect_radius: f32,
    /// Orb speed before the player's move speed is added.
    pub base_speed: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: PICKUP_CHECK_INTERVAL_SECS,
            collect_radius: PICKUP_COLLECT_RADIUS,
            base_speed: PICKUP_BASE_SPEED,
        }
    }
}
