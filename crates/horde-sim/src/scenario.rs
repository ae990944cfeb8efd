//! Built-in game content: the default level curve, stat tiers, weapons,
//! enemy roster and wave cycle.
//!
//! A JSON config only overrides the sections it names; everything else
//! comes from here.

use glam::Vec2;

use horde_ai::profiles::{EnemyProfile, EnemyRoster};
use horde_core::constants::RUN_DURATION_SECS;
use horde_core::types::EnemyKind;

use crate::config::*;
use crate::stats::StatLevelEntry;
use crate::systems::spawn_point::SpawnBoundary;
use crate::systems::wave_spawner::WaveDefinition;
use crate::weapon::WeaponLevelEntry;

pub fn default_game() -> GameConfig {
    GameConfig {
        level_curve: LevelCurveConfig {
            seed: vec![0, 5, 12, 20, 30],
            level_count: 100,
        },
        stats: default_stats(),
        weapons: default_weapons(),
        waves: default_waves(),
        enemies: default_roster(),
        spawn_boundary: SpawnBoundary::new(Vec2::new(-12.0, -7.0), Vec2::new(12.0, 7.0)),
        culling: CullingConfig::default(),
        pickups: PickupConfig::default(),
        run_duration_secs: RUN_DURATION_SECS,
    }
}

pub fn default_stats() -> StatsConfig {
    StatsConfig {
        move_speed: extended(&[(0, 4.0), (20, 4.5)], 10),
        health: extended(&[(0, 100.0), (25, 120.0)], 10),
        pickup_range: extended(&[(0, 1.5), (15, 2.0)], 8),
        // Weapon slots are a fixed short table, not extrapolated.
        max_weapons: StatTableConfig {
            seed: entries(&[(0, 2.0), (50, 3.0), (120, 4.0), (250, 5.0)]),
            level_count: None,
        },
    }
}

fn extended(seed: &[(u32, f32)], level_count: usize) -> StatTableConfig {
    StatTableConfig {
        seed: entries(seed),
        level_count: Some(level_count),
    }
}

fn entries(seed: &[(u32, f32)]) -> Vec<StatLevelEntry> {
    seed.iter()
        .map(|&(cost, value)| StatLevelEntry::new(cost, value))
        .collect()
}

fn default_weapons() -> Vec<WeaponConfig> {
    vec![
        WeaponConfig {
            name: "Sword Swipe".into(),
            levels: vec![
                tier(3.0, 1.5, 1.0, "Damage up"),
                tier(5.0, 1.4, 1.0, "Attack faster"),
                tier(5.0, 1.1, 1.0, "Swing twice"),
                tier(6.0, 1.1, 2.0, "Damage up"),
                tier(8.0, 1.0, 2.0, "Max level"),
            ],
        },
        WeaponConfig {
            name: "Thrown Axe".into(),
            levels: vec![
                WeaponLevelEntry {
                    speed: 6.0,
                    ..tier(5.0, 2.0, 1.0, "Throw another axe")
                },
                WeaponLevelEntry {
                    speed: 6.0,
                    ..tier(5.0, 2.0, 2.0, "Heavier axes")
                },
                WeaponLevelEntry {
                    speed: 6.5,
                    ..tier(8.0, 1.8, 2.0, "Throw another axe")
                },
                WeaponLevelEntry {
                    speed: 7.0,
                    ..tier(8.0, 1.6, 3.0, "Max level")
                },
            ],
        },
        WeaponConfig {
            name: "Magic Bolt".into(),
            levels: vec![
                WeaponLevelEntry {
                    speed: 10.0,
                    range: 8.0,
                    ..tier(2.0, 1.0, 1.0, "Fire faster")
                },
                WeaponLevelEntry {
                    speed: 10.0,
                    range: 8.0,
                    ..tier(2.0, 0.7, 1.0, "Extra bolt")
                },
                WeaponLevelEntry {
                    speed: 11.0,
                    range: 9.0,
                    ..tier(3.0, 0.7, 2.0, "Max level")
                },
            ],
        },
        WeaponConfig {
            name: "Holy Zone".into(),
            levels: vec![
                WeaponLevelEntry {
                    size: 1.5,
                    duration: 3.0,
                    ..tier(1.0, 4.0, 1.0, "Bigger zone")
                },
                WeaponLevelEntry {
                    size: 2.0,
                    duration: 3.0,
                    ..tier(1.0, 4.0, 1.0, "Longer zone")
                },
                WeaponLevelEntry {
                    size: 2.0,
                    duration: 4.5,
                    ..tier(2.0, 3.5, 1.0, "Max level")
                },
            ],
        },
        WeaponConfig {
            name: "Spinning Blade".into(),
            levels: vec![
                WeaponLevelEntry {
                    speed: 180.0,
                    duration: 4.0,
                    ..tier(2.0, 5.0, 1.0, "Add a blade")
                },
                WeaponLevelEntry {
                    speed: 180.0,
                    duration: 4.0,
                    ..tier(2.0, 5.0, 2.0, "Spin faster")
                },
                WeaponLevelEntry {
                    speed: 240.0,
                    duration: 5.0,
                    ..tier(3.0, 4.5, 2.0, "Add a blade")
                },
                WeaponLevelEntry {
                    speed: 240.0,
                    duration: 5.0,
                    ..tier(3.0, 4.5, 3.0, "Max level")
                },
            ],
        },
    ]
}

fn tier(damage: f32, attack_interval: f32, projectile_count: f32, upgrade: &str) -> WeaponLevelEntry {
    WeaponLevelEntry {
        damage,
        attack_interval,
        projectile_count,
        upgrade_description: upgrade.into(),
        ..Default::default()
    }
}

fn default_waves() -> Vec<WaveDefinition> {
    vec![
        WaveDefinition::new("slime", 30.0, 1.0),
        WaveDefinition::new("bat", 30.0, 0.6),
        WaveDefinition::new("skeleton", 40.0, 0.8),
        WaveDefinition::new("bat", 20.0, 0.25),
        WaveDefinition::new("ghost", 40.0, 0.5),
    ]
}

fn default_roster() -> EnemyRoster {
    [
        (
            "slime",
            EnemyProfile {
                move_speed: 1.2,
                damage: 5.0,
                health: 5.0,
                exp_to_give: 1,
                ..Default::default()
            },
        ),
        (
            "bat",
            EnemyProfile {
                move_speed: 2.4,
                damage: 4.0,
                health: 3.0,
                knockback_time: 0.3,
                exp_to_give: 1,
                ..Default::default()
            },
        ),
        (
            "skeleton",
            EnemyProfile {
                move_speed: 1.0,
                damage: 12.0,
                health: 20.0,
                knockback_time: 0.2,
                exp_to_give: 3,
                ..Default::default()
            },
        ),
        (
            "ghost",
            EnemyProfile {
                move_speed: 1.8,
                damage: 10.0,
                health: 12.0,
                hit_wait_time: 0.5,
                exp_to_give: 2,
                ..Default::default()
            },
        ),
    ]
    .into_iter()
    .map(|(name, profile)| (EnemyKind::new(name), profile))
    .collect()
}
