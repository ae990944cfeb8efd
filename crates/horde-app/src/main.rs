//! Headless HORDE runner.
//!
//! Usage: `horde-app [config.json] [seconds]`
//!
//! Plays a scripted run: the player walks in a circle, every weapon attack
//! hits the oldest live enemy, level-ups take the first choice, and the boss
//! intro is skipped. Logs go through `RUST_LOG` (default `info`); the final
//! snapshot is printed as JSON.

use std::collections::VecDeque;
use std::process::ExitCode;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use glam::Vec2;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use horde_app::error::AppError;
use horde_app::game_loop::TICK_DURATION;
use horde_app::ipc;
use horde_app::state::AppState;
use horde_core::commands::PlayerCommand;
use horde_core::events::{PresentationRequest, SpawnedEntity};
use horde_core::types::EntityHandle;
use horde_sim::config::GameConfig;
use horde_sim::engine::SimConfig;

const DEFAULT_RUN_SECS: u64 = 20;
const WALK_RADIUS: f32 = 3.0;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let game = match args.first() {
        Some(path) => GameConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    let run_secs = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RUN_SECS);

    let state = AppState::new();
    let requests = ipc::start_simulation(
        &state,
        SimConfig {
            game,
            ..Default::default()
        },
    )?;
    ipc::send_command(&state, PlayerCommand::StartRun)?;

    let started = Instant::now();
    let deadline = started + Duration::from_secs(run_secs);
    let mut enemies: VecDeque<EntityHandle> = VecDeque::new();
    let mut removed = 0u32;

    let mut last_move = started;

    while Instant::now() < deadline {
        if last_move.elapsed() >= TICK_DURATION {
            last_move = Instant::now();
            let angle = started.elapsed().as_secs_f32() * 0.5;
            ipc::send_command(
                &state,
                PlayerCommand::PlayerMoved {
                    position: walk_position(angle),
                },
            )?;
        }

        let request = match requests.recv_timeout(TICK_DURATION) {
            Ok(request) => request,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Err(AppError::Disconnected),
        };

        match request {
            PresentationRequest::SpawnEntity {
                handle,
                entity: SpawnedEntity::Enemy { .. },
                ..
            } => enemies.push_back(handle),
            PresentationRequest::DespawnEntity { handle } => {
                if let Some(index) = enemies.iter().position(|&h| h == handle) {
                    enemies.remove(index);
                    removed += 1;
                }
            }
            PresentationRequest::WeaponFired { damage, .. } => {
                if let Some(&target) = enemies.front() {
                    ipc::send_command(
                        &state,
                        PlayerCommand::EnemyHit {
                            entity: target,
                            damage,
                            knockback: true,
                        },
                    )?;
                }
            }
            PresentationRequest::ShowLevelUpChoices { choices } => {
                if let Some(choice) = choices.first() {
                    info!(weapon = %choice.name, unlock = choice.unlock, "taking upgrade");
                    ipc::send_command(&state, PlayerCommand::SelectUpgrade { weapon: choice.weapon })?;
                }
            }
            PresentationRequest::BeginBossEncounter => {
                info!("countdown finished, fighting the boss");
                ipc::send_command(&state, PlayerCommand::Resume)?;
            }
            PresentationRequest::LevelEnded { outcome } => {
                info!(?outcome, "level ended");
                break;
            }
            _ => {}
        }
    }

    ipc::stop_simulation(&state)?;
    if let Some(snapshot) = ipc::get_snapshot(&state)? {
        info!(
            level = snapshot.progression.level,
            removed,
            tracked = snapshot.tracked_enemies,
            elapsed = snapshot.time.elapsed_secs,
            "run finished"
        );
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => error!(%err, "could not serialize snapshot"),
        }
    }
    Ok(())
}

/// Point on the walking circle.
fn walk_position(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * WALK_RADIUS
}
