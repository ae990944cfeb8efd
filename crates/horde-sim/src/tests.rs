//! Tests for the simulation engine: run lifecycle, combat, pickups,
//! level-ups, stat purchases and culling.

use glam::Vec2;

use horde_core::commands::PlayerCommand;
use horde_core::components::{EnemyBrain, ExpOrb, Health};
use horde_core::enums::*;
use horde_core::events::{PresentationRequest, SpawnedEntity};
use horde_core::types::EntityHandle;

use crate::config::GameConfig;
use crate::engine::{SimConfig, SimulationEngine};
use crate::world_setup::entity_of;

/// Default content with the wave cycle removed, so only test-spawned
/// enemies exist.
fn quiet_engine() -> SimulationEngine {
    timed_engine(GameConfig::default().run_duration_secs)
}

/// Like `quiet_engine`, with a custom survival countdown.
fn timed_engine(run_duration_secs: f32) -> SimulationEngine {
    let game = GameConfig {
        waves: Vec::new(),
        run_duration_secs,
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    })
    .unwrap();
    engine.queue_command(PlayerCommand::StartRun);
    engine.tick();
    engine
}

/// Tick until the phase leaves Active, returning the snapshot requests of
/// the tick that froze it.
fn tick_until_frozen(engine: &mut SimulationEngine, max_ticks: usize) -> Vec<PresentationRequest> {
    for _ in 0..max_ticks {
        let snap = engine.tick();
        if snap.phase != GamePhase::Active {
            return snap.requests;
        }
    }
    panic!("still active after {max_ticks} ticks");
}

fn run_ticks(engine: &mut SimulationEngine, ticks: usize) -> Vec<PresentationRequest> {
    let mut requests = Vec::new();
    for _ in 0..ticks {
        requests.extend(engine.tick().requests);
    }
    requests
}

fn count_orbs(engine: &SimulationEngine) -> usize {
    let mut q = engine.world().query::<&ExpOrb>();
    q.iter().count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    })
    .unwrap();

    engine_a.queue_command(PlayerCommand::StartRun);
    engine_b.queue_command(PlayerCommand::StartRun);

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    engine_a.queue_command(PlayerCommand::StartRun);
    engine_b.queue_command(PlayerCommand::StartRun);

    // Spawn positions are random, so the first spawns diverge.
    let mut diverged = false;
    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Run lifecycle ----

#[test]
fn test_malformed_config_is_rejected() {
    let mut game = GameConfig::default();
    game.level_curve.seed.clear();
    assert!(SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    })
    .is_err());
}

#[test]
fn test_start_run_phase_gating() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    assert_eq!(engine.phase(), GamePhase::MainMenu);

    engine.tick();
    assert_eq!(engine.time().tick, 0, "main menu does not run the clock");

    engine.queue_command(PlayerCommand::StartRun);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.time.tick, 1);

    // A second StartRun mid-run is rejected and changes nothing.
    engine.queue_command(PlayerCommand::StartRun);
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 2);
}

#[test]
fn test_run_starts_with_one_weapon_at_level_one() {
    let engine = quiet_engine();
    assert_eq!(engine.arsenal().owned_count(), 1);
    assert_eq!(engine.progression().current_level(), 1);
    assert_eq!(engine.progression().current_experience(), 0);
    assert_eq!(engine.waves().current_wave_index(), None);
    assert!(engine.player().is_alive());
}

#[test]
fn test_starting_weapon_fires_immediately() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::StartRun);
    let snap = engine.tick();
    let fired = snap
        .requests
        .iter()
        .filter(|r| matches!(r, PresentationRequest::WeaponFired { .. }))
        .count();
    assert_eq!(fired, 1);
    assert!(snap
        .requests
        .iter()
        .any(|r| matches!(r, PresentationRequest::UpdateHud { level: 1, .. })));
}

#[test]
fn test_tick_timing_30_ticks_one_second() {
    let mut engine = quiet_engine();
    let start = engine.time().elapsed_secs;
    run_ticks(&mut engine, 30);
    assert!((engine.time().elapsed_secs - start - 1.0).abs() < 1e-4);
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = quiet_engine();
    let enemy = engine.spawn_test_enemy("slime", Vec2::new(5.0, 0.0));

    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Paused);
    let paused_at = engine.time().tick;
    let position = enemy_position(&engine, enemy);

    run_ticks(&mut engine, 30);
    assert_eq!(engine.time().tick, paused_at);
    assert_eq!(enemy_position(&engine, enemy), position);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.time().tick, paused_at + 1);
}

#[test]
fn test_set_time_scale() {
    let mut engine = quiet_engine();

    engine.queue_command(PlayerCommand::SetTimeScale { scale: 10.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 4.0);

    engine.queue_command(PlayerCommand::SetTimeScale { scale: 0.0 });
    engine.tick();
    let frozen_at = engine.time();
    run_ticks(&mut engine, 10);
    assert_eq!(engine.time().tick, frozen_at.tick);

    engine.queue_command(PlayerCommand::SetTimeScale { scale: 2.0 });
    run_ticks(&mut engine, 15);
    assert!((engine.time().elapsed_secs - frozen_at.elapsed_secs - 1.0).abs() < 1e-4);
}

#[test]
fn test_waves_spawn_enemies_around_player() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::StartRun);
    engine.queue_command(PlayerCommand::PlayerMoved {
        position: Vec2::new(50.0, 50.0),
    });

    let requests = run_ticks(&mut engine, 95);
    let spawns: Vec<Vec2> = requests
        .iter()
        .filter_map(|r| match r {
            PresentationRequest::SpawnEntity {
                entity: SpawnedEntity::Enemy { .. },
                position,
                ..
            } => Some(*position),
            _ => None,
        })
        .collect();

    // First wave spawns once a second.
    assert_eq!(spawns.len(), 3);
    let boundary = *engine.waves().boundary();
    for p in spawns {
        assert!(boundary.on_edge(p, 1e-3), "{p} not on the spawn edge");
    }
    assert_eq!(engine.waves().current_wave_index(), Some(0));
}

// ---- Enemies ----

fn enemy_position(engine: &SimulationEngine, handle: EntityHandle) -> Vec2 {
    let entity = entity_of(handle).unwrap();
    engine
        .world()
        .get::<&horde_core::components::Position>(entity)
        .unwrap()
        .0
}

#[test]
fn test_enemies_chase_player() {
    let mut engine = quiet_engine();
    let enemy = engine.spawn_test_enemy("slime", Vec2::new(5.0, 0.0));
    run_ticks(&mut engine, 30);
    let p = enemy_position(&engine, enemy);
    assert!(p.x < 5.0 && p.x > 3.0, "enemy at {p}");
    assert!(p.y.abs() < 1e-4);
}

#[test]
fn test_enemy_hit_knockback_then_kill() {
    let mut engine = quiet_engine();
    let enemy = engine.spawn_test_enemy("slime", Vec2::new(3.0, 0.0));
    let entity = entity_of(enemy).unwrap();

    engine.queue_command(PlayerCommand::EnemyHit {
        entity: enemy,
        damage: 2.0,
        knockback: true,
    });
    let snap = engine.tick();
    assert!(snap
        .requests
        .iter()
        .any(|r| matches!(r, PresentationRequest::DamageNumber { amount, .. } if *amount == 2.0)));
    assert_eq!(
        engine.world().get::<&EnemyBrain>(entity).unwrap().phase,
        EnemyPhase::KnockedBack
    );
    assert!((engine.world().get::<&Health>(entity).unwrap().current - 3.0).abs() < 1e-6);
    // Knocked back away from the player.
    assert!(enemy_position(&engine, enemy).x > 3.0);

    engine.queue_command(PlayerCommand::EnemyHit {
        entity: enemy,
        damage: 10.0,
        knockback: false,
    });
    let snap = engine.tick();
    assert!(!engine.world().contains(entity));
    assert!(snap
        .requests
        .iter()
        .any(|r| matches!(r, PresentationRequest::DespawnEntity { handle } if *handle == enemy)));
    assert!(snap.requests.iter().any(|r| matches!(
        r,
        PresentationRequest::SpawnEntity {
            entity: SpawnedEntity::ExpOrb { value: 1 },
            ..
        }
    )));
    assert_eq!(count_orbs(&engine), 1);
}

#[test]
fn test_unknown_entity_is_rejected() {
    let mut engine = quiet_engine();
    let enemy = engine.spawn_test_enemy("slime", Vec2::new(3.0, 0.0));
    engine.queue_command(PlayerCommand::EnemyHit {
        entity: enemy,
        damage: 100.0,
        knockback: false,
    });
    engine.tick();

    // Hitting it again after death must not panic or change anything.
    engine.queue_commands([
        PlayerCommand::EnemyHit {
            entity: enemy,
            damage: 1.0,
            knockback: true,
        },
        PlayerCommand::EnemyContact { entity: enemy },
        PlayerCommand::EnemyHit {
            entity: EntityHandle(0),
            damage: 1.0,
            knockback: false,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.player.health, snap.player.max_health);
}

#[test]
fn test_enemy_defeated_only_removes_enemies() {
    let mut engine = quiet_engine();
    let far = Vec2::new(50.0, 0.0);
    engine.queue_command(PlayerCommand::EnemyDefeated {
        entity: None,
        position: far,
        exp_value: 1,
    });
    let snap = engine.tick();
    let orb = snap
        .requests
        .iter()
        .find_map(|r| match r {
            PresentationRequest::SpawnEntity {
                handle,
                entity: SpawnedEntity::ExpOrb { .. },
                ..
            } => Some(*handle),
            _ => None,
        })
        .unwrap();

    // An orb's handle is not an enemy: nothing is removed and nothing drops.
    engine.queue_command(PlayerCommand::EnemyDefeated {
        entity: Some(orb),
        position: far,
        exp_value: 1,
    });
    let snap = engine.tick();
    assert!(engine.world().contains(entity_of(orb).unwrap()));
    assert_eq!(count_orbs(&engine), 1);
    assert!(!snap
        .requests
        .iter()
        .any(|r| matches!(r, PresentationRequest::DespawnEntity { .. })));

    // A real enemy is removed and drops its orb.
    let enemy = engine.spawn_test_enemy("slime", far);
    engine.queue_command(PlayerCommand::EnemyDefeated {
        entity: Some(enemy),
        position: far,
        exp_value: 1,
    });
    engine.tick();
    assert!(!engine.world().contains(entity_of(enemy).unwrap()));
    assert_eq!(count_orbs(&engine), 2);

    // Reporting the same enemy again still drops an orb.
    engine.queue_command(PlayerCommand::EnemyDefeated {
        entity: Some(enemy),
        position: far,
        exp_value: 1,
    });
    engine.tick();
    assert_eq!(count_orbs(&engine), 3);
}

#[test]
fn test_enemy_contact_respects_hit_wait_time() {
    let mut engine = quiet_engine();
    let enemy = engine.spawn_test_enemy("slime", Vec2::new(0.5, 0.0));
    let max = engine.player().max_health;

    engine.queue_commands([
        PlayerCommand::EnemyContact { entity: enemy },
        PlayerCommand::EnemyContact { entity: enemy },
    ]);
    engine.tick();
    assert!((engine.player().health - (max - 5.0)).abs() < 1e-4);

    run_ticks(&mut engine, 40);
    engine.queue_command(PlayerCommand::EnemyContact { entity: enemy });
    engine.tick();
    assert!((engine.player().health - (max - 10.0)).abs() < 1e-4);
}

#[test]
fn test_player_death_ends_run() {
    let mut engine = quiet_engine();
    engine.queue_command(PlayerCommand::PlayerDamaged { amount: 1_000.0 });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.player.health, 0.0);
    assert!(snap.requests.contains(&PresentationRequest::PlayerDied));

    let over_at = engine.time().tick;
    run_ticks(&mut engine, 10);
    assert_eq!(engine.time().tick, over_at);

    // Damage after death is rejected; a new run restores everything.
    engine.queue_command(PlayerCommand::PlayerDamaged { amount: 1.0 });
    engine.queue_command(PlayerCommand::StartRun);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.player.health, snap.player.max_health);
    assert_eq!(snap.progression.level, 1);
}

// ---- Pickups ----

#[test]
fn test_orb_at_player_is_collected() {
    let mut engine = quiet_engine();
    engine.queue_command(PlayerCommand::EnemyDefeated {
        entity: None,
        position: Vec2::ZERO,
        exp_value: 3,
    });
    engine.tick();
    assert_eq!(count_orbs(&engine), 0);
    assert_eq!(engine.progression().current_experience(), 3);
}

#[test]
fn test_orb_magnetizes_inside_pickup_range() {
    let mut engine = quiet_engine();
    let range = engine.player().pickup_range;
    engine.queue_commands([
        PlayerCommand::EnemyDefeated {
            entity: None,
            position: Vec2::new(range * 0.8, 0.0),
            exp_value: 2,
        },
        PlayerCommand::EnemyDefeated {
            entity: None,
            position: Vec2::new(range * 4.0, 0.0),
            exp_value: 5,
        },
    ]);
    run_ticks(&mut engine, 30);

    assert_eq!(engine.progression().current_experience(), 2);
    // The far orb never moved.
    let mut q = engine.world().query::<(&horde_core::components::Position, &ExpOrb)>();
    let remaining: Vec<_> = q.iter().map(|(_, (p, orb))| (p.0, orb.magnetized)).collect();
    assert_eq!(remaining, vec![(Vec2::new(range * 4.0, 0.0), false)]);
}

// ---- Level-ups ----

#[test]
fn test_level_up_freezes_until_choice() {
    let mut engine = quiet_engine();
    let required = engine.progression().required_for_next();
    engine.grant_exp(required);
    assert_eq!(engine.phase(), GamePhase::LevelUpSelection);

    let snap = engine.tick();
    let frozen_at = snap.time.tick;
    assert_eq!(snap.pending_choices.len(), 3);
    assert!(snap
        .requests
        .contains(&PresentationRequest::FreezeSimulation { frozen: true }));
    assert!(snap
        .requests
        .iter()
        .any(|r| matches!(r, PresentationRequest::ShowLevelUpChoices { choices } if choices.len() == 3)));

    run_ticks(&mut engine, 5);
    assert_eq!(engine.time().tick, frozen_at);

    let choice = engine.pending_choices()[0];
    let was_inactive = engine.arsenal().status(choice) == WeaponStatus::Inactive;
    engine.queue_command(PlayerCommand::SelectUpgrade { weapon: choice });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.pending_choices.is_empty());
    if was_inactive {
        assert_ne!(engine.arsenal().status(choice), WeaponStatus::Inactive);
        assert_eq!(engine.arsenal().owned_count(), 2);
    } else {
        assert_eq!(engine.arsenal().get(choice).unwrap().current_level(), 1);
    }
}

#[test]
fn test_level_up_mid_tick_skips_later_systems() {
    let mut game = GameConfig {
        waves: Vec::new(),
        ..Default::default()
    };
    for weapon in &mut game.weapons {
        for level in &mut weapon.levels {
            level.attack_interval = 0.001;
        }
    }
    let mut engine = SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    })
    .unwrap();
    engine.queue_command(PlayerCommand::StartRun);
    engine.tick();

    // Collected in the pickup step of this tick, which opens the panel.
    engine.queue_command(PlayerCommand::EnemyDefeated {
        entity: None,
        position: Vec2::ZERO,
        exp_value: 1_000,
    });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::LevelUpSelection);

    let freeze_at = snap
        .requests
        .iter()
        .position(|r| *r == PresentationRequest::FreezeSimulation { frozen: true })
        .unwrap();
    assert!(!snap.requests[freeze_at..]
        .iter()
        .any(|r| matches!(r, PresentationRequest::WeaponFired { .. })));
}

#[test]
fn test_choice_not_offered_is_rejected() {
    let mut engine = quiet_engine();
    engine.grant_exp(engine.progression().required_for_next());
    let offered = engine.pending_choices().to_vec();
    let not_offered = engine
        .arsenal()
        .views()
        .into_iter()
        .map(|w| w.id)
        .find(|id| {
            !offered.contains(id) && engine.arsenal().status(*id) == WeaponStatus::Inactive
        })
        .unwrap();

    engine.queue_command(PlayerCommand::SelectUpgrade {
        weapon: not_offered,
    });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::LevelUpSelection);
    assert_eq!(engine.arsenal().status(not_offered), WeaponStatus::Inactive);
}

#[test]
fn test_level_ups_during_selection_are_queued() {
    let mut engine = quiet_engine();
    engine.grant_exp(engine.progression().required_for_next());
    assert_eq!(engine.phase(), GamePhase::LevelUpSelection);

    // Earned while the panel is open.
    engine.grant_exp(1_000);
    assert_eq!(engine.progression().current_level(), 3);

    engine.queue_command(PlayerCommand::SkipUpgrade);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::LevelUpSelection);
    assert!(!snap.pending_choices.is_empty());

    engine.queue_command(PlayerCommand::SkipUpgrade);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
}

#[test]
fn test_pause_during_selection_returns_to_panel() {
    let mut engine = quiet_engine();
    engine.grant_exp(engine.progression().required_for_next());
    engine.queue_command(PlayerCommand::Pause);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Paused);
    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::LevelUpSelection);
}

// ---- Stats and coins ----

#[test]
fn test_purchase_requires_coins() {
    let mut engine = quiet_engine();
    let speed = engine.player().move_speed;

    engine.queue_command(PlayerCommand::PurchaseStat {
        stat: StatKind::MoveSpeed,
    });
    let snap = engine.tick();
    assert_eq!(snap.player.coins, 0);
    assert_eq!(snap.player.stat_levels, [0; 4]);

    engine.queue_commands([
        PlayerCommand::CurrencyEarned { amount: 25 },
        PlayerCommand::PurchaseStat {
            stat: StatKind::MoveSpeed,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.player.coins, 5);
    assert_eq!(snap.player.stat_levels[0], 1);
    assert!(snap.player.move_speed > speed);
    assert!(snap
        .requests
        .contains(&PresentationRequest::UpdateCoins { balance: 5 }));
}

#[test]
fn test_health_purchase_heals_by_the_increase() {
    let mut engine = quiet_engine();
    engine.queue_commands([
        PlayerCommand::PlayerDamaged { amount: 10.0 },
        PlayerCommand::CurrencyEarned { amount: 100 },
        PlayerCommand::PurchaseStat {
            stat: StatKind::Health,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.player.max_health, 120.0);
    assert_eq!(snap.player.health, 110.0);
}

#[test]
fn test_purchase_from_level_up_panel_closes_it() {
    let mut engine = quiet_engine();
    engine.queue_command(PlayerCommand::CurrencyEarned { amount: 100 });
    engine.tick();
    engine.grant_exp(engine.progression().required_for_next());
    assert_eq!(engine.phase(), GamePhase::LevelUpSelection);

    engine.queue_command(PlayerCommand::PurchaseStat {
        stat: StatKind::PickupRange,
    });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.player.stat_levels[2], 1);
}

#[test]
fn test_max_weapons_purchase_opens_slots() {
    let mut engine = quiet_engine();
    assert_eq!(engine.player().max_weapons, 2);
    engine.queue_commands([
        PlayerCommand::CurrencyEarned { amount: 50 },
        PlayerCommand::PurchaseStat {
            stat: StatKind::MaxWeapons,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.player.max_weapons, 3);
}

// ---- Culling ----

#[test]
fn test_distant_enemies_are_culled() {
    let mut engine = quiet_engine();
    let far = engine.spawn_test_enemy("slime", Vec2::new(1_000.0, 0.0));
    let near = engine.spawn_test_enemy("slime", Vec2::new(3.0, 0.0));
    assert_eq!(engine.culling().len(), 2);

    let requests = run_ticks(&mut engine, 40);
    assert!(!engine.world().contains(entity_of(far).unwrap()));
    assert!(engine.world().contains(entity_of(near).unwrap()));
    assert_eq!(engine.culling().len(), 1);
    assert!(requests.contains(&PresentationRequest::DespawnEntity { handle: far }));
}

#[test]
fn test_killed_enemies_drop_out_of_the_cull_registry() {
    let mut engine = quiet_engine();
    let enemy = engine.spawn_test_enemy("slime", Vec2::new(3.0, 0.0));
    engine.queue_command(PlayerCommand::EnemyHit {
        entity: enemy,
        damage: 50.0,
        knockback: false,
    });
    engine.tick();
    assert_eq!(engine.culling().len(), 1, "still registered until swept");
    run_ticks(&mut engine, 40);
    assert!(engine.culling().is_empty());
}

// ---- Snapshot ----

// ---- Survival countdown ----

#[test]
fn test_countdown_reports_remaining_time() {
    let mut engine = timed_engine(10.0);
    let start = engine.run_timer().remaining();
    let requests = run_ticks(&mut engine, 30);
    let shown: Vec<f32> = requests
        .iter()
        .filter_map(|r| match r {
            PresentationRequest::UpdateTimer { remaining_secs } => Some(*remaining_secs),
            _ => None,
        })
        .collect();
    assert_eq!(shown.len(), 30);
    assert!(shown.windows(2).all(|w| w[1] < w[0]));
    assert!((start - engine.run_timer().remaining() - 1.0).abs() < 1e-3);
}

#[test]
fn test_countdown_freezes_on_the_scaled_clock() {
    let mut engine = timed_engine(10.0);
    engine.queue_command(PlayerCommand::Pause);
    engine.tick();
    let remaining = engine.run_timer().remaining();
    run_ticks(&mut engine, 30);
    assert_eq!(engine.run_timer().remaining(), remaining);

    engine.queue_commands([
        PlayerCommand::Resume,
        PlayerCommand::SetTimeScale { scale: 2.0 },
    ]);
    run_ticks(&mut engine, 15);
    assert!((remaining - engine.run_timer().remaining() - 1.0).abs() < 1e-3);
}

#[test]
fn test_countdown_expiry_starts_boss_encounter() {
    let mut engine = timed_engine(1.0);
    let requests = tick_until_frozen(&mut engine, 40);
    assert_eq!(engine.phase(), GamePhase::Paused);
    assert!(engine.run_timer().is_expired());
    assert!(requests.contains(&PresentationRequest::BeginBossEncounter));
    assert!(requests.contains(&PresentationRequest::FreezeSimulation { frozen: true }));
    assert!(requests.contains(&PresentationRequest::UpdateTimer {
        remaining_secs: 0.0
    }));
    assert!(!requests
        .iter()
        .any(|r| matches!(r, PresentationRequest::WeaponFired { .. })));

    // Frozen for the intro until the presentation resumes.
    let frozen_at = engine.time().tick;
    run_ticks(&mut engine, 10);
    assert_eq!(engine.time().tick, frozen_at);

    engine.queue_command(PlayerCommand::Resume);
    let requests = run_ticks(&mut engine, 30);
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.time().tick, frozen_at + 30);
    assert!(!requests.iter().any(|r| matches!(
        r,
        PresentationRequest::UpdateTimer { .. } | PresentationRequest::BeginBossEncounter
    )));
}

#[test]
fn test_boss_defeat_completes_the_level() {
    let mut engine = timed_engine(1.0);

    // No boss yet.
    engine.queue_command(PlayerCommand::BossDefeated);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);

    tick_until_frozen(&mut engine, 40);
    engine.queue_commands([PlayerCommand::Resume, PlayerCommand::BossDefeated]);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::LevelComplete);
    assert!(snap.requests.contains(&PresentationRequest::LevelEnded {
        outcome: LevelOutcome::BossDefeated
    }));

    let done_at = engine.time().tick;
    run_ticks(&mut engine, 10);
    assert_eq!(engine.time().tick, done_at);

    // A new run restarts the countdown.
    engine.queue_command(PlayerCommand::StartRun);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(!snap.timer.expired);
    assert!(snap.timer.remaining_secs > 0.9);
}

#[test]
fn test_death_outcome_depends_on_countdown() {
    let mut engine = timed_engine(1.0);
    engine.queue_command(PlayerCommand::PlayerDamaged { amount: 1_000.0 });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert!(snap.requests.contains(&PresentationRequest::LevelEnded {
        outcome: LevelOutcome::Overwhelmed
    }));

    engine.queue_command(PlayerCommand::StartRun);
    engine.tick();
    tick_until_frozen(&mut engine, 40);
    engine.queue_commands([
        PlayerCommand::Resume,
        PlayerCommand::PlayerDamaged { amount: 1_000.0 },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert!(snap.requests.contains(&PresentationRequest::LevelEnded {
        outcome: LevelOutcome::SlainByBoss
    }));
}

#[test]
fn test_snapshot_size_under_100kb() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::StartRun);
    let mut last = engine.tick();
    for _ in 0..600 {
        last = engine.tick();
        // Keep the run going through level-ups.
        if last.phase == GamePhase::LevelUpSelection {
            engine.queue_command(PlayerCommand::SkipUpgrade);
        }
    }
    let json = serde_json::to_string(&last).unwrap();
    assert!(json.len() < 100_000, "snapshot is {} bytes", json.len());
    assert!(last.tracked_enemies > 0);
    assert_eq!(last.weapons.len(), engine.arsenal().len());
}
